//! Game state module - the state machine that owns the world
//!
//! This module ties together the generator, the integrator and the detector.
//! It sequences them once per tick and applies the results: score increments,
//! passed flags and the `Playing -> Ended` transition.
//!
//! Commands issued in a phase where they do not apply are silent no-ops, so
//! stray input can never put the game in an invalid state.

use arrayvec::{ArrayVec, Drain};

use crate::collision::{detect, Geometry};
use crate::obstacles::generate;
use crate::physics::{apply_jump, step_bird, step_obstacles};
use crate::rng::{RandomSource, SimpleRng};
use crate::types::{ConfigError, GameAction, GameConfig, GameEvent, GamePhase};
use crate::world::{Bird, Obstacle, World};

/// Room for the events of several ticks between drains. When full, the
/// oldest event is dropped.
pub const EVENT_CAPACITY: usize = 64;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R: RandomSource = SimpleRng> {
    config: GameConfig,
    world: World,
    rng: R,
    /// Events produced since the last drain (consumed by the session).
    events: ArrayVec<GameEvent, EVENT_CAPACITY>,
}

impl GameState<SimpleRng> {
    /// Create a new game with the given RNG seed
    pub fn new(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        Self::with_rng(config, SimpleRng::new(seed))
    }
}

impl<R: RandomSource> GameState<R> {
    /// Create a new game drawing gap placement from `rng`.
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            world: World::idle(&config),
            config,
            rng,
            events: ArrayVec::new(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn phase(&self) -> GamePhase {
        self.world.phase
    }

    pub fn score(&self) -> u32 {
        self.world.score
    }

    pub fn bird(&self) -> Bird {
        self.world.bird
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.world.obstacles
    }

    /// Copy the world into `out`, reusing its storage.
    pub fn snapshot_into(&self, out: &mut World) {
        out.clone_from(&self.world);
    }

    pub fn snapshot(&self) -> World {
        self.world.clone()
    }

    /// Events produced since the last call, oldest first.
    pub fn drain_events(&mut self) -> Drain<'_, GameEvent, EVENT_CAPACITY> {
        self.events.drain(..)
    }

    fn push_event(&mut self, event: GameEvent) {
        if self.events.is_full() {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Begin a round. Valid from `Idle` or `Ended`; ignored while `Playing`.
    pub fn start(&mut self) -> bool {
        if self.world.phase == GamePhase::Playing {
            return false;
        }

        let round = self.world.round.wrapping_add(1);
        let mut world = World::idle(&self.config);
        let first = self.spawn_obstacle();
        world.obstacles.push(first);
        world.round = round;
        world.phase = GamePhase::Playing;
        self.world = world;

        self.push_event(GameEvent::Started { round });
        true
    }

    /// Apply the jump impulse. Ignored outside `Playing`.
    pub fn jump(&mut self) -> bool {
        if self.world.phase != GamePhase::Playing {
            return false;
        }
        self.world.bird = apply_jump(self.world.bird, self.config.jump_force);
        self.push_event(GameEvent::Jumped);
        true
    }

    /// Advance the simulation by one fixed step. Ignored outside `Playing`.
    ///
    /// Order: integrate bird and obstacles, prune, spawn, then detect against
    /// the fully updated state.
    pub fn tick(&mut self) -> bool {
        if self.world.phase != GamePhase::Playing {
            return false;
        }

        let dt = self.config.time_step;
        let pipe_width = self.config.pipe_width;

        self.world.bird = step_bird(self.world.bird, self.config.gravity, dt);

        let mut obstacles = step_obstacles(
            std::mem::take(&mut self.world.obstacles),
            self.config.pipe_speed,
            dt,
        );
        obstacles.retain(|o| o.x > -pipe_width);

        let spawn_line = self.config.play_area_width - self.config.spawn_distance;
        let needs_spawn = obstacles.last().map_or(true, |rear| rear.x <= spawn_line);
        if needs_spawn && !obstacles.is_full() {
            let next = self.spawn_obstacle();
            obstacles.push(next);
        }

        self.world.obstacles = obstacles;
        self.world.tick = self.world.tick.wrapping_add(1);

        let detection = detect(
            &self.world.bird,
            &self.world.obstacles,
            &Geometry::from(&self.config),
        );

        for &i in &detection.newly_passed {
            self.world.obstacles[i].passed = true;
            self.world.score = self.world.score.saturating_add(1);
            let score = self.world.score;
            self.push_event(GameEvent::Scored { score });
        }

        if let Some(cause) = detection.collision {
            self.world.phase = GamePhase::Ended;
            let score = self.world.score;
            self.push_event(GameEvent::Collided { cause, score });
        }

        true
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Jump => self.jump(),
            GameAction::Start => self.start(),
        }
    }

    /// Change the play area between rounds.
    ///
    /// Returns `Ok(false)` (and changes nothing) while a round is in progress.
    /// In `Idle` the waiting bird is re-centered for the new height.
    pub fn set_play_area(&mut self, width: f64, height: f64) -> Result<bool, ConfigError> {
        if self.world.phase == GamePhase::Playing {
            return Ok(false);
        }

        let config = self.config.with_play_area(width, height);
        config.validate()?;
        self.config = config;

        if self.world.phase == GamePhase::Idle {
            self.world.bird = Bird::spawn(&self.config);
        }
        Ok(true)
    }

    fn spawn_obstacle(&mut self) -> Obstacle {
        generate(
            self.config.play_area_height,
            self.config.gap_height,
            self.config.min_edge_margin,
            self.config.play_area_width,
            &mut self.rng,
        )
    }
}

impl Default for GameState<SimpleRng> {
    fn default() -> Self {
        Self {
            config: GameConfig::default(),
            world: World::default(),
            rng: SimpleRng::default(),
            events: ArrayVec::new(),
        }
    }
}
