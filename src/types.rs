//! Shared pure data types and timing constants.
//! This module has no external dependencies.

/// Fixed update tick (milliseconds).
pub const TICK_MS: u32 = 16;

/// Default board configuration.
pub const DEFAULT_GRID_WIDTH: u8 = 10;
pub const DEFAULT_GRID_HEIGHT: u8 = 20;
pub const DEFAULT_CELL_PX: u16 = 16;
pub const DEFAULT_DROP_INTERVAL_MS: u32 = 2000;
pub const DEFAULT_INPUT_LOCKOUT_MS: u32 = 70;

/// Grid axes are clamped to this range, inclusive.
pub const MIN_GRID_AXIS: u8 = 4;
pub const MAX_GRID_AXIS: u8 = 20;

/// Tetromino piece kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    J,
    L,
    S,
    Z,
    T,
}

impl PieceKind {
    /// All seven kinds, in bag-fill order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::T => "t",
        }
    }
}

/// A board-grid coordinate. `(0, 0)` is the top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub x: i8,
    pub y: i8,
}

impl GridPos {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// This position shifted by `(dx, dy)`.
    pub const fn offset(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// This position shifted one cell in `dir`.
    pub fn shifted(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        self.offset(dx, dy)
    }
}

/// Unit movement direction for the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    /// `(dx, dy)` in grid cells. Positive y points down.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }
}

/// Logical player actions the core reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
}

impl GameAction {
    pub const ALL: [GameAction; 6] = [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::RotateCw,
        GameAction::RotateCcw,
    ];

    /// Stable index for per-action state tables.
    pub const fn index(self) -> usize {
        match self {
            GameAction::MoveLeft => 0,
            GameAction::MoveRight => 1,
            GameAction::SoftDrop => 2,
            GameAction::HardDrop => 3,
            GameAction::RotateCw => 4,
            GameAction::RotateCcw => 5,
        }
    }
}

/// Board configuration supplied by the embedder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    /// Grid width in cells, clamped to `MIN_GRID_AXIS..=MAX_GRID_AXIS`.
    pub width: u8,
    /// Grid height in cells, clamped to `MIN_GRID_AXIS..=MAX_GRID_AXIS`.
    pub height: u8,
    /// Side length of one cell in pixels; tile positions are kept in pixel
    /// space and divided back down to grid coordinates.
    pub cell_px: u16,
    /// Gravity cadence.
    pub drop_interval_ms: u32,
    /// Cooldown between accepted discrete input actions.
    pub input_lockout_ms: u32,
}

impl BoardConfig {
    /// Return a copy with both grid axes clamped to the supported range.
    pub fn clamped(mut self) -> Self {
        self.width = self.width.clamp(MIN_GRID_AXIS, MAX_GRID_AXIS);
        self.height = self.height.clamp(MIN_GRID_AXIS, MAX_GRID_AXIS);
        self.cell_px = self.cell_px.max(1);
        self
    }

    /// Column the spawn origin sits in (the horizontal mid-column).
    pub fn spawn_column(&self) -> i8 {
        (self.width / 2) as i8
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            cell_px: DEFAULT_CELL_PX,
            drop_interval_ms: DEFAULT_DROP_INTERVAL_MS,
            input_lockout_ms: DEFAULT_INPUT_LOCKOUT_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_deltas() {
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
        assert_eq!(Direction::Down.delta(), (0, 1));
    }

    #[test]
    fn test_grid_pos_shifted() {
        let p = GridPos::new(4, 7);
        assert_eq!(p.shifted(Direction::Down), GridPos::new(4, 8));
        assert_eq!(p.shifted(Direction::Left), GridPos::new(3, 7));
    }

    #[test]
    fn test_config_clamping() {
        let cfg = BoardConfig {
            width: 2,
            height: 50,
            cell_px: 0,
            ..BoardConfig::default()
        }
        .clamped();
        assert_eq!(cfg.width, MIN_GRID_AXIS);
        assert_eq!(cfg.height, MAX_GRID_AXIS);
        assert_eq!(cfg.cell_px, 1);
    }

    #[test]
    fn test_action_indices_are_unique() {
        let mut seen = [false; 6];
        for action in GameAction::ALL {
            assert!(!seen[action.index()]);
            seen[action.index()] = true;
        }
    }
}
