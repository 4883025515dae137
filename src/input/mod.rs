//! Terminal input: key mapping and per-tick action state.

pub mod actions;
pub mod map;

pub use actions::{ActionState, KeyTracker};
pub use map::{map_key, should_quit, should_restart};
