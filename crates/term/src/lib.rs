//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget/layout toolkits and instead renders into a simple
//! framebuffer that can be flushed to a terminal backend.
//!
//! - [`fb`]: styled cell grid
//! - [`game_view`]: world to framebuffer (pure, testable)
//! - [`renderer`]: diffing crossterm presenter

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_flappy_core as core;
pub use tui_flappy_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Layout, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
