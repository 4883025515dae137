//! Piece - an aggregate of exactly four tiles forming one tetromino.
//!
//! Owns shape construction, the two-phase (validate-then-commit) group
//! move, rotation about the origin tile, and the lock transition that
//! freezes tiles into the grid. A piece is either falling or locked;
//! locked is terminal.

use crate::core::grid::{Grid, LockedTile};
use crate::core::tile::PieceTile;
use crate::types::{BoardConfig, Direction, GridPos, PieceKind};

/// Result of a group move attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// All four tiles translated.
    Moved,
    /// No tile moved; the piece is still falling.
    Blocked,
    /// A downward move collided; the piece froze into the grid.
    Locked,
}

/// Translation fallbacks tried in order when a plain rotation collides.
const ROTATE_KICKS: [(i8, i8); 5] = [(0, 0), (-1, 0), (1, 0), (-2, 0), (2, 0)];

/// The active falling piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    tiles: [PieceTile; 4],
    locked: bool,
}

impl Piece {
    /// Construct a piece of `kind` at its spawn position: the board
    /// mid-column, top row, nudged per shape for visual centering.
    pub fn spawn(kind: PieceKind, config: &BoardConfig) -> Self {
        let cells = spawn_cells(kind, config.spawn_column());
        let tiles = [
            PieceTile::new(0, cells[0], config.cell_px),
            PieceTile::new(1, cells[1], config.cell_px),
            PieceTile::new(2, cells[2], config.cell_px),
            PieceTile::new(3, cells[3], config.cell_px),
        ];
        Self {
            kind,
            tiles,
            locked: false,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn tiles(&self) -> &[PieceTile; 4] {
        &self.tiles
    }

    /// Grid cells currently covered by the four tiles.
    pub fn cells(&self) -> [GridPos; 4] {
        [
            self.tiles[0].grid_pos(),
            self.tiles[1].grid_pos(),
            self.tiles[2].grid_pos(),
            self.tiles[3].grid_pos(),
        ]
    }

    /// True once the piece has frozen into the grid.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// True when every tile sits on a valid (in-bounds, free) cell.
    pub fn is_valid(&self, grid: &Grid) -> bool {
        self.tiles.iter().all(|t| grid.is_valid(t.grid_pos()))
    }

    /// Attempt to translate all four tiles one cell in `dir`.
    ///
    /// Two-phase, all-or-nothing: every tile's prospective cell is checked
    /// first; if any check fails no tile moves. A failed downward move is
    /// the canonical settling trigger and locks the piece as a side effect.
    pub fn try_move(&mut self, dir: Direction, grid: &mut Grid) -> MoveOutcome {
        if self.locked {
            return MoveOutcome::Blocked;
        }

        for tile in &self.tiles {
            if !tile.can_move_to(tile.grid_pos().shifted(dir), grid) {
                if dir == Direction::Down {
                    self.lock(grid);
                    return MoveOutcome::Locked;
                }
                return MoveOutcome::Blocked;
            }
        }

        for tile in &mut self.tiles {
            tile.translate(dir);
        }
        MoveOutcome::Moved
    }

    /// Attempt to rotate the piece a quarter turn about tile 0's cell.
    ///
    /// Like moves this is all-or-nothing: target cells for all four tiles
    /// are validated before anything is repositioned. When `with_kicks` is
    /// set, a blocked rotation retries through a short list of horizontal
    /// fallback translations. O pieces never rotate. Returns whether the
    /// rotation was applied.
    pub fn try_rotate(&mut self, clockwise: bool, with_kicks: bool, grid: &Grid) -> bool {
        if self.locked || self.kind == PieceKind::O {
            return false;
        }

        let pivot = self.tiles[0].grid_pos();
        let mut rotated = [GridPos::new(0, 0); 4];
        for (i, tile) in self.tiles.iter().enumerate() {
            let pos = tile.grid_pos();
            let (dx, dy) = (pos.x - pivot.x, pos.y - pivot.y);
            let (rx, ry) = if clockwise { (-dy, dx) } else { (dy, -dx) };
            rotated[i] = GridPos::new(pivot.x + rx, pivot.y + ry);
        }

        let kicks: &[(i8, i8)] = if with_kicks { &ROTATE_KICKS } else { &ROTATE_KICKS[..1] };
        for &(kx, ky) in kicks {
            let fits = rotated
                .iter()
                .all(|&p| grid.is_valid(p.offset(kx, ky)));
            if fits {
                for (tile, &p) in self.tiles.iter_mut().zip(rotated.iter()) {
                    tile.place_at(p.offset(kx, ky));
                }
                return true;
            }
        }

        false
    }

    /// Freeze every tile into the grid at its current cell.
    ///
    /// The grid takes ownership of the four cells (they persist as the
    /// static board layer); the piece becomes terminal and its owner is
    /// expected to discard it. Sole mutator of grid occupancy.
    pub fn lock(&mut self, grid: &mut Grid) {
        debug_assert!(!self.locked, "piece locked twice");
        for tile in &self.tiles {
            grid.lock_cell(
                tile.grid_pos(),
                LockedTile {
                    kind: self.kind,
                    tile_index: tile.index(),
                },
            );
        }
        self.locked = true;
    }
}

/// Fixed per-shape spawn layout, one layout per kind.
///
/// Offsets are relative to the spawn origin at (`mid`, 0); shapes whose
/// layout would otherwise hug the left edge or poke above the board get a
/// one-cell nudge right or down.
fn spawn_cells(kind: PieceKind, mid: i8) -> [GridPos; 4] {
    let at = |x: i8, y: i8| GridPos::new(x, y);
    match kind {
        PieceKind::I => [at(mid, 0), at(mid - 1, 0), at(mid + 1, 0), at(mid + 2, 0)],
        PieceKind::O => [at(mid, 1), at(mid + 1, 1), at(mid + 1, 0), at(mid, 0)],
        PieceKind::J => [
            at(mid + 1, 0),
            at(mid, 0),
            at(mid + 2, 1),
            at(mid + 2, 0),
        ],
        PieceKind::L => [
            at(mid + 1, 0),
            at(mid, 0),
            at(mid, 1),
            at(mid + 2, 0),
        ],
        PieceKind::S => [
            at(mid + 1, 0),
            at(mid + 1, 1),
            at(mid, 1),
            at(mid + 2, 0),
        ],
        PieceKind::Z => [
            at(mid + 1, 0),
            at(mid, 0),
            at(mid + 2, 1),
            at(mid + 1, 1),
        ],
        PieceKind::T => [
            at(mid + 1, 1),
            at(mid, 1),
            at(mid + 1, 0),
            at(mid + 2, 1),
        ],
    }
}
