//! TUI Flappy (workspace facade crate).
//!
//! Re-exports the `tui_flappy::{core,engine,input,term,types}` API while the
//! implementation lives in dedicated crates under `crates/`.

pub mod cli;

pub use tui_flappy_core as core;
pub use tui_flappy_engine as engine;
pub use tui_flappy_input as input;
pub use tui_flappy_term as term;
pub use tui_flappy_types as types;
