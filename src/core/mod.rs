//! Core module - pure game logic.
//!
//! Contains the grid/occupancy model, the active piece and its tiles, the
//! piece-supply state machine, and the tick-driven session that owns them.
//! It has zero dependencies on UI or I/O.

pub mod grid;
pub mod piece;
pub mod rng;
pub mod session;
pub mod supply;
pub mod tile;
pub mod timer;

pub use grid::{Grid, LockedTile};
pub use piece::{MoveOutcome, Piece};
pub use rng::{SevenBag, SimpleRng};
pub use session::GameSession;
pub use supply::{Supply, SupplyEvent, SupplyState};
pub use tile::PieceTile;
pub use timer::IntervalTimer;
