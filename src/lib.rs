//! Gridfall - falling-block puzzle gameplay core.
//!
//! The `core` module is pure game logic with no I/O; `input` maps terminal
//! key events onto the per-action boolean state the core consumes; `term`
//! renders a game session into a terminal framebuffer.

pub mod core;
pub mod input;
pub mod term;
pub mod types;
