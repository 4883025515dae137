//! Grid module - the board occupancy model.
//!
//! The grid is a W x H array of cells created once at session start and
//! mutated only by the lock transition of a piece. Coordinates: `(x, y)`
//! with x in `0..width` (left to right) and y in `0..height` (top to
//! bottom). Uses a flat row-major `Vec` for cache locality.

use crate::types::{BoardConfig, GridPos, PieceKind};

/// A tile that has been frozen into the grid.
///
/// Ownership of a piece tile transfers here at lock time; the occupant is
/// what the renderer draws as the static board layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockedTile {
    pub kind: PieceKind,
    /// Index 0..=3 the tile had inside its piece.
    pub tile_index: u8,
}

/// Occupancy of one cell: `None` is free. The `Option` encodes the
/// invariant that a cell is occupied iff a locked tile is present.
pub type Cell = Option<LockedTile>;

/// The game board occupancy grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (`y * width + x`).
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid sized from the (clamped) configuration.
    pub fn new(config: &BoardConfig) -> Self {
        let config = config.clamped();
        let len = config.width as usize * config.height as usize;
        Self {
            width: config.width,
            height: config.height,
            cells: vec![None; len],
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    #[inline(always)]
    fn index(&self, pos: GridPos) -> Option<usize> {
        if pos.x < 0 || pos.x >= self.width as i8 || pos.y < 0 || pos.y >= self.height as i8 {
            return None;
        }
        Some(pos.y as usize * self.width as usize + pos.x as usize)
    }

    /// Occupancy at `pos`, or `None` when out of bounds.
    pub fn get(&self, pos: GridPos) -> Option<Cell> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// True iff `pos` is inside the board on both axes and the cell is free.
    ///
    /// Pure query with no side effects; calling it twice with no intervening
    /// mutation yields the same answer.
    pub fn is_valid(&self, pos: GridPos) -> bool {
        matches!(self.get(pos), Some(None))
    }

    /// True iff `pos` is inside the board and holds a locked tile.
    pub fn is_occupied(&self, pos: GridPos) -> bool {
        matches!(self.get(pos), Some(Some(_)))
    }

    /// Freeze `tile` into the cell at `pos`.
    ///
    /// Callers must have validated `pos` through the move protocol; locking
    /// an occupied or out-of-bounds cell is a protocol violation.
    pub fn lock_cell(&mut self, pos: GridPos, tile: LockedTile) {
        debug_assert!(
            self.is_valid(pos),
            "lock_cell on invalid cell ({}, {})",
            pos.x,
            pos.y
        );
        if let Some(i) = self.index(pos) {
            self.cells[i] = Some(tile);
        }
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Iterate all occupied cells with their positions.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (GridPos, LockedTile)> + '_ {
        let width = self.width as usize;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.map(|tile| {
                let pos = GridPos::new((i % width) as i8, (i / width) as i8);
                (pos, tile)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BoardConfig;

    fn grid_10x20() -> Grid {
        Grid::new(&BoardConfig::default())
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = grid_10x20();
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 20);
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn test_index_bounds() {
        let grid = grid_10x20();
        assert_eq!(grid.index(GridPos::new(0, 0)), Some(0));
        assert_eq!(grid.index(GridPos::new(9, 0)), Some(9));
        assert_eq!(grid.index(GridPos::new(0, 1)), Some(10));
        assert_eq!(grid.index(GridPos::new(9, 19)), Some(199));
        assert_eq!(grid.index(GridPos::new(-1, 0)), None);
        assert_eq!(grid.index(GridPos::new(10, 0)), None);
        assert_eq!(grid.index(GridPos::new(0, 20)), None);
    }

    #[test]
    fn test_lock_cell_sets_occupant() {
        let mut grid = grid_10x20();
        let tile = LockedTile {
            kind: PieceKind::T,
            tile_index: 2,
        };
        grid.lock_cell(GridPos::new(5, 10), tile);

        assert!(!grid.is_valid(GridPos::new(5, 10)));
        assert!(grid.is_occupied(GridPos::new(5, 10)));
        assert_eq!(grid.get(GridPos::new(5, 10)), Some(Some(tile)));
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn test_occupied_cells_iterator() {
        let mut grid = grid_10x20();
        let tile = LockedTile {
            kind: PieceKind::I,
            tile_index: 0,
        };
        grid.lock_cell(GridPos::new(3, 19), tile);
        grid.lock_cell(GridPos::new(7, 4), tile);

        let mut cells: Vec<_> = grid.occupied_cells().map(|(p, _)| p).collect();
        cells.sort_by_key(|p| (p.y, p.x));
        assert_eq!(cells, vec![GridPos::new(7, 4), GridPos::new(3, 19)]);
    }

    #[test]
    fn test_grid_respects_clamped_config() {
        let cfg = BoardConfig {
            width: 2,
            height: 99,
            ..BoardConfig::default()
        };
        let grid = Grid::new(&cfg);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 20);
    }
}
