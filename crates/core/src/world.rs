//! World model: the bird, the obstacle list, and the round bookkeeping.
//!
//! Positions are in play-area units with `y = 0` at the top edge. A [`World`]
//! value doubles as the immutable snapshot handed to observers.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::types::{GameConfig, GamePhase, MAX_OBSTACLES};

/// Fixed-capacity obstacle sequence in spawn order.
pub type ObstacleList = ArrayVec<Obstacle, MAX_OBSTACLES>;

/// The player-controlled entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bird {
    /// Left edge; constant for the whole round.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Vertical velocity (negative is up).
    pub velocity: f64,
}

impl Bird {
    /// Bird at rest with its top edge at `y`.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, velocity: 0.0 }
    }

    /// Spawn position for a new round: lane x, vertically centered.
    pub fn spawn(config: &GameConfig) -> Self {
        Self::new(config.bird_x, config.play_area_height / 2.0)
    }
}

/// A pipe pair with a gap between the upper and lower barrier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Obstacle {
    /// Left edge.
    pub x: f64,
    /// Height of the upper barrier; the gap starts here.
    pub top_height: f64,
    /// Height of the lower barrier.
    pub bottom_height: f64,
    /// Set once the obstacle has been scored.
    pub passed: bool,
}

impl Obstacle {
    pub fn right_edge(&self, pipe_width: f64) -> f64 {
        self.x + pipe_width
    }

    /// Lower edge of the gap (top of the lower barrier).
    pub fn gap_bottom(&self, gap_height: f64) -> f64 {
        self.top_height + gap_height
    }
}

/// Authoritative game world.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct World {
    pub bird: Bird,
    pub obstacles: ObstacleList,
    pub score: u32,
    pub phase: GamePhase,
    /// Ticks simulated in the current round.
    pub tick: u64,
    /// Rounds started so far; 0 until the first `start()`.
    pub round: u32,
}

impl World {
    /// Pre-game world: bird waiting in its lane, no obstacles.
    pub fn idle(config: &GameConfig) -> Self {
        Self {
            bird: Bird::spawn(config),
            obstacles: ObstacleList::new(),
            score: 0,
            phase: GamePhase::Idle,
            tick: 0,
            round: 0,
        }
    }

    /// Next obstacle the bird has not yet scored.
    pub fn next_obstacle(&self) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| !o.passed)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::idle(&GameConfig::default())
    }
}
