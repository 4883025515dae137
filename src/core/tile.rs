//! PieceTile - one cell of the active piece.
//!
//! A tile tracks its on-screen position in pixel space; the board-grid
//! coordinate is always derived from that position divided by the cell
//! size, so the two can never drift apart. Movement here is unconditional:
//! validation happens in `Piece` before any tile is touched
//! (validate-then-commit).

use crate::core::grid::Grid;
use crate::types::{Direction, GridPos};

/// One of the four cells of a falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceTile {
    index: u8,
    /// On-screen position in pixels, always a multiple of `cell_px`.
    px: (i32, i32),
    cell_px: u16,
}

impl PieceTile {
    /// Create a tile with index `index` (0..=3) sitting on grid cell `pos`.
    pub fn new(index: u8, pos: GridPos, cell_px: u16) -> Self {
        debug_assert!(index < 4);
        let cell = cell_px.max(1);
        Self {
            index,
            px: (pos.x as i32 * cell as i32, pos.y as i32 * cell as i32),
            cell_px: cell,
        }
    }

    /// Index of this tile inside its piece.
    pub fn index(&self) -> u8 {
        self.index
    }

    /// On-screen position in pixels.
    pub fn pixel_pos(&self) -> (i32, i32) {
        self.px
    }

    /// Board-grid coordinate, derived from the pixel position.
    pub fn grid_pos(&self) -> GridPos {
        let cell = self.cell_px as i32;
        GridPos::new((self.px.0 / cell) as i8, (self.px.1 / cell) as i8)
    }

    /// Whether this tile may occupy `target`. Delegates to the grid's
    /// position-validity rule.
    pub fn can_move_to(&self, target: GridPos, grid: &Grid) -> bool {
        grid.is_valid(target)
    }

    /// Translate one cell in `dir` without validation.
    ///
    /// Callers must have validated the destination first.
    pub fn translate(&mut self, dir: Direction) {
        let (dx, dy) = dir.delta();
        let cell = self.cell_px as i32;
        self.px.0 += dx as i32 * cell;
        self.px.1 += dy as i32 * cell;
    }

    /// Re-seat the tile on grid cell `pos` without validation.
    ///
    /// Used by rotation, which repositions tiles non-adjacently.
    pub fn place_at(&mut self, pos: GridPos) {
        let cell = self.cell_px as i32;
        self.px = (pos.x as i32 * cell, pos.y as i32 * cell);
    }
}
