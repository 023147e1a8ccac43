//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no I/O, making them usable in any context
//! (core simulation, terminal rendering, headless runs, event traces).
//!
//! # Play Area
//!
//! The simulation works in abstract play-area units, not terminal cells:
//!
//! - **Width**: 400 units, obstacles spawn at the right edge
//! - **Height**: 600 units, `y = 0` is the top edge
//! - **Bird lane**: the bird's left edge sits at `x = 100` for the whole round
//!
//! # Default Tuning
//!
//! Physics constants are expressed per tick (`time_step = 1.0`):
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `GRAVITY` | 0.6 | Downward acceleration per tick |
//! | `JUMP_FORCE` | -12.0 | Velocity set by a jump (negative is up) |
//! | `PIPE_SPEED` | 3.0 | Obstacle scroll speed per tick |
//! | `BIRD_SIZE` | 30 | Bird bounding square |
//! | `PIPE_WIDTH` | 60 | Obstacle width |
//! | `GAP_HEIGHT` | 200 | Passable opening height |
//! | `MIN_EDGE_MARGIN` | 50 | Minimum barrier height at either edge |
//! | `SPAWN_DISTANCE` | 220 | Distance the rearmost obstacle travels before the next spawns |
//!
//! # Examples
//!
//! ```
//! use tui_flappy_types::{GameAction, GameConfig, GamePhase};
//!
//! let config = GameConfig::default();
//! assert!(config.validate().is_ok());
//!
//! assert_eq!(GameAction::from_str("jump"), Some(GameAction::Jump));
//! assert_eq!(GamePhase::Idle.as_str(), "idle");
//! ```

use serde::{Deserialize, Serialize};

pub mod config;

pub use config::{ConfigError, GameConfig};

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u64 = 16;

/// Integration step in tick units.
pub const TIME_STEP: f64 = 1.0;

/// Play area width in simulation units
pub const PLAY_AREA_WIDTH: f64 = 400.0;

/// Play area height in simulation units
pub const PLAY_AREA_HEIGHT: f64 = 600.0;

/// Side length of the bird's bounding square
pub const BIRD_SIZE: f64 = 30.0;

/// Fixed horizontal position of the bird's left edge
pub const BIRD_X: f64 = 100.0;

/// Obstacle width
pub const PIPE_WIDTH: f64 = 60.0;

/// Height of the passable gap between the two barriers
pub const GAP_HEIGHT: f64 = 200.0;

/// Minimum height of either barrier, keeps every gap on screen
pub const MIN_EDGE_MARGIN: f64 = 50.0;

/// Downward acceleration per tick
pub const GRAVITY: f64 = 0.6;

/// Vertical velocity assigned by a jump (negative is up)
pub const JUMP_FORCE: f64 = -12.0;

/// Obstacle scroll speed per tick
pub const PIPE_SPEED: f64 = 3.0;

/// Distance from the right edge the rearmost obstacle must reach before the next spawns
pub const SPAWN_DISTANCE: f64 = 220.0;

/// Capacity of the obstacle list. Configurations whose spawn spacing could
/// exceed it are rejected by [`GameConfig::validate`].
pub const MAX_OBSTACLES: usize = 16;

/// Largest accepted play area height. Keeps the integer range the generator
/// draws gap placement from well inside `u32`.
pub const MAX_PLAY_AREA_HEIGHT: f64 = 1_000_000.0;

/// Most ticks the clock will replay after a stall; older backlog is dropped.
pub const MAX_CATCH_UP_TICKS: u32 = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_geometry_leaves_room_for_a_gap() {
        assert!(GAP_HEIGHT + 2.0 * MIN_EDGE_MARGIN <= PLAY_AREA_HEIGHT);
        assert!(BIRD_SIZE < GAP_HEIGHT);
        assert!(BIRD_X + BIRD_SIZE < PLAY_AREA_WIDTH);
    }

    #[test]
    fn phase_and_action_strings_round_trip() {
        for phase in [GamePhase::Idle, GamePhase::Playing, GamePhase::Ended] {
            assert_eq!(GamePhase::from_str(phase.as_str()), Some(phase));
        }
        assert_eq!(GameAction::from_str("START"), Some(GameAction::Start));
        assert_eq!(GameAction::from_str("flap"), None);
    }
}

/// Top-level game mode.
///
/// - **Idle**: initial; the world is not yet playable
/// - **Playing**: ticks advance the simulation
/// - **Ended**: the round is over and the score is frozen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    #[default]
    Idle,
    Playing,
    Ended,
}

impl GamePhase {
    /// Parse phase from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "idle" => Some(GamePhase::Idle),
            "playing" => Some(GamePhase::Playing),
            "ended" => Some(GamePhase::Ended),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::Playing => "playing",
            GamePhase::Ended => "ended",
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, GamePhase::Playing)
    }
}

/// Commands a player (or controller) can issue.
///
/// These are the only two externally invokable commands. Both are ignored
/// in phases where they do not apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Replace the bird's vertical velocity with the jump impulse
    Jump,
    /// Begin a new round (from Idle or Ended)
    Start,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_flappy_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("Jump"), Some(GameAction::Jump));
    /// assert_eq!(GameAction::from_str("start"), Some(GameAction::Start));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "jump" => Some(GameAction::Jump),
            "start" => Some(GameAction::Start),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Jump => "jump",
            GameAction::Start => "start",
        }
    }
}

/// What ended a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionCause {
    /// Bird's top edge reached `y <= 0`
    Ceiling,
    /// Bird's bottom edge reached the play area height
    Floor,
    /// Bird overlapped an obstacle outside its gap
    Pipe,
}

/// Discrete event emitted by the state machine.
///
/// The presentation layer maps these to feedback (overlays, sounds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A new round began.
    Started { round: u32 },
    /// A jump impulse was applied.
    Jumped,
    /// An obstacle was passed; `score` is the new total.
    Scored { score: u32 },
    /// The round ended.
    Collided { cause: CollisionCause, score: u32 },
}
