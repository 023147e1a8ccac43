//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]s. Flappy input
//! is a single edge-triggered flap, so there is no repeat handling here.

pub mod map;

pub use tui_flappy_types as types;

pub use map::{handle_key_event, should_quit};
