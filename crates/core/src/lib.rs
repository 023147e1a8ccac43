//! Core simulation module - pure, deterministic, and testable
//!
//! This crate contains the game rules and the state machine that applies them.
//! It has **zero dependencies** on terminals, clocks, or I/O, making it:
//!
//! - **Deterministic**: the same seed produces the same gaps and the same run
//! - **Testable**: every rule is a pure function with unit tests beside it
//! - **Portable**: runs in the terminal, headless, or under a test harness
//! - **Allocation-free per tick**: obstacles and pending events live in
//!   fixed-capacity lists
//!
//! # Module Structure
//!
//! - [`rng`]: seeded random source used for gap placement
//! - [`obstacles`]: obstacle generator
//! - [`physics`]: semi-implicit Euler integrator and obstacle scrolling
//! - [`collision`]: boundary/obstacle collision and pass detection
//! - [`world`]: bird, obstacle, and world snapshot types
//! - [`game_state`]: the `Idle -> Playing -> Ended` state machine
//!
//! # Example
//!
//! ```
//! use tui_flappy_core::GameState;
//! use tui_flappy_types::{GameConfig, GamePhase};
//!
//! let mut game = GameState::new(GameConfig::default(), 12345).unwrap();
//! assert_eq!(game.phase(), GamePhase::Idle);
//!
//! game.start();
//! game.tick();
//! assert!((game.bird().y - 300.6).abs() < 1e-9);
//!
//! game.jump();
//! game.tick();
//! assert!((game.bird().velocity - -11.4).abs() < 1e-9);
//! ```
//!
//! # Timing
//!
//! The state machine has no notion of wall time. Call
//! [`GameState::tick`](game_state::GameState::tick) once per fixed step; the
//! engine crate's clock decides when a step is due.

pub mod collision;
pub mod game_state;
pub mod obstacles;
pub mod physics;
pub mod rng;
pub mod world;

pub use tui_flappy_types as types;

// Re-export commonly used types for convenience
pub use collision::{detect, Detection, Geometry};
pub use game_state::{GameState, EVENT_CAPACITY};
pub use obstacles::generate;
pub use physics::{apply_jump, step_bird, step_obstacles};
pub use rng::{RandomSource, SequenceRng, SimpleRng};
pub use world::{Bird, Obstacle, ObstacleList, World};
