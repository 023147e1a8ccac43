//! Game configuration: tunable constants, environment overrides, validation.
//!
//! Every value has a default (see the crate-level table). Overrides come from
//! an optional JSON document and from `FLAPPY_*` environment variables, in
//! that order. [`GameConfig::validate`] rejects geometry that could produce an
//! unplayable obstacle before any round starts.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    BIRD_SIZE, BIRD_X, GAP_HEIGHT, GRAVITY, JUMP_FORCE, MAX_CATCH_UP_TICKS, MIN_EDGE_MARGIN,
    MAX_OBSTACLES, MAX_PLAY_AREA_HEIGHT, PIPE_SPEED, PIPE_WIDTH, PLAY_AREA_HEIGHT, PLAY_AREA_WIDTH, SPAWN_DISTANCE, TICK_MS, TIME_STEP,
};

/// Configuration rejected before the game starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("gap height {gap_height} plus two edge margins of {min_edge_margin} exceeds play area height {play_area_height}")]
    DegenerateObstacle {
        gap_height: f64,
        min_edge_margin: f64,
        play_area_height: f64,
    },

    #[error("{field} must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("bird size {bird_size} does not fit through a gap of {gap_height}")]
    BirdLargerThanGap { bird_size: f64, gap_height: f64 },

    #[error("bird lane x={bird_x} (size {bird_size}) lies outside play area width {play_area_width}")]
    BirdOutsidePlayArea {
        bird_x: f64,
        bird_size: f64,
        play_area_width: f64,
    },

    #[error("spawn distance {spawn_distance} would keep {needed} obstacles on screen (limit {limit})")]
    TooManyObstacles {
        spawn_distance: f64,
        needed: usize,
        limit: usize,
    },

    #[error("{field} must not exceed {limit} (got {value})")]
    TooLarge {
        field: &'static str,
        value: f64,
        limit: f64,
    },

    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: String, value: String },

    #[error("invalid config document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tunable simulation constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub bird_size: f64,
    pub bird_x: f64,
    pub pipe_width: f64,
    pub gap_height: f64,
    pub min_edge_margin: f64,
    pub gravity: f64,
    pub jump_force: f64,
    pub pipe_speed: f64,
    pub spawn_distance: f64,
    /// Integration step `dt`, in tick units.
    pub time_step: f64,
    pub tick_period_ms: u64,
    pub max_catch_up_ticks: u32,
    pub play_area_width: f64,
    pub play_area_height: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            bird_size: BIRD_SIZE,
            bird_x: BIRD_X,
            pipe_width: PIPE_WIDTH,
            gap_height: GAP_HEIGHT,
            min_edge_margin: MIN_EDGE_MARGIN,
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            pipe_speed: PIPE_SPEED,
            spawn_distance: SPAWN_DISTANCE,
            time_step: TIME_STEP,
            tick_period_ms: TICK_MS,
            max_catch_up_ticks: MAX_CATCH_UP_TICKS,
            play_area_width: PLAY_AREA_WIDTH,
            play_area_height: PLAY_AREA_HEIGHT,
        }
    }
}

impl GameConfig {
    /// Defaults overlaid with `FLAPPY_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|var| std::env::var(var).ok())
    }

    /// Parse a (possibly partial) JSON document; missing fields keep their defaults.
    pub fn from_json(doc: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(doc)?)
    }

    /// Apply overrides from a variable lookup.
    ///
    /// Blank values are treated as unset. Unparsable values are an error
    /// rather than a silent fallback to the default.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        override_from(&lookup, "FLAPPY_BIRD_SIZE", &mut self.bird_size)?;
        override_from(&lookup, "FLAPPY_BIRD_X", &mut self.bird_x)?;
        override_from(&lookup, "FLAPPY_PIPE_WIDTH", &mut self.pipe_width)?;
        override_from(&lookup, "FLAPPY_GAP_HEIGHT", &mut self.gap_height)?;
        override_from(&lookup, "FLAPPY_MIN_EDGE_MARGIN", &mut self.min_edge_margin)?;
        override_from(&lookup, "FLAPPY_GRAVITY", &mut self.gravity)?;
        override_from(&lookup, "FLAPPY_JUMP_FORCE", &mut self.jump_force)?;
        override_from(&lookup, "FLAPPY_PIPE_SPEED", &mut self.pipe_speed)?;
        override_from(&lookup, "FLAPPY_SPAWN_DISTANCE", &mut self.spawn_distance)?;
        override_from(&lookup, "FLAPPY_TIME_STEP", &mut self.time_step)?;
        override_from(&lookup, "FLAPPY_TICK_MS", &mut self.tick_period_ms)?;
        override_from(&lookup, "FLAPPY_MAX_CATCH_UP", &mut self.max_catch_up_ticks)?;
        override_from(&lookup, "FLAPPY_WIDTH", &mut self.play_area_width)?;
        override_from(&lookup, "FLAPPY_HEIGHT", &mut self.play_area_height)?;
        Ok(self)
    }

    /// Return a copy with a different play area.
    pub fn with_play_area(self, width: f64, height: f64) -> Self {
        Self {
            play_area_width: width,
            play_area_height: height,
            ..self
        }
    }

    /// Fail fast on values that would make the simulation meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let floats = [
            ("bird_size", self.bird_size),
            ("bird_x", self.bird_x),
            ("pipe_width", self.pipe_width),
            ("gap_height", self.gap_height),
            ("min_edge_margin", self.min_edge_margin),
            ("gravity", self.gravity),
            ("jump_force", self.jump_force),
            ("pipe_speed", self.pipe_speed),
            ("spawn_distance", self.spawn_distance),
            ("time_step", self.time_step),
            ("play_area_width", self.play_area_width),
            ("play_area_height", self.play_area_height),
        ];
        for (field, value) in floats {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
        }

        let positive = [
            ("bird_size", self.bird_size),
            ("pipe_width", self.pipe_width),
            ("gap_height", self.gap_height),
            ("pipe_speed", self.pipe_speed),
            ("spawn_distance", self.spawn_distance),
            ("time_step", self.time_step),
            ("tick_period_ms", self.tick_period_ms as f64),
            ("play_area_width", self.play_area_width),
            ("play_area_height", self.play_area_height),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if self.min_edge_margin < 0.0 {
            return Err(ConfigError::Negative {
                field: "min_edge_margin",
                value: self.min_edge_margin,
            });
        }

        if self.play_area_height > MAX_PLAY_AREA_HEIGHT {
            return Err(ConfigError::TooLarge {
                field: "play_area_height",
                value: self.play_area_height,
                limit: MAX_PLAY_AREA_HEIGHT,
            });
        }

        if self.gap_height + 2.0 * self.min_edge_margin > self.play_area_height {
            return Err(ConfigError::DegenerateObstacle {
                gap_height: self.gap_height,
                min_edge_margin: self.min_edge_margin,
                play_area_height: self.play_area_height,
            });
        }

        if self.bird_size >= self.gap_height {
            return Err(ConfigError::BirdLargerThanGap {
                bird_size: self.bird_size,
                gap_height: self.gap_height,
            });
        }

        if self.bird_x < 0.0 || self.bird_x + self.bird_size > self.play_area_width {
            return Err(ConfigError::BirdOutsidePlayArea {
                bird_x: self.bird_x,
                bird_size: self.bird_size,
                play_area_width: self.play_area_width,
            });
        }

        // Consecutive spawns are at least `spawn_distance` apart and live in (-pipe_width, width].
        let needed = ((self.play_area_width + self.pipe_width) / self.spawn_distance).floor() as usize + 1;
        if needed > MAX_OBSTACLES {
            return Err(ConfigError::TooManyObstacles {
                spawn_distance: self.spawn_distance,
                needed,
                limit: MAX_OBSTACLES,
            });
        }

        Ok(())
    }
}

fn override_from<F, T>(lookup: &F, var: &str, slot: &mut T) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(raw) = lookup(var) else {
        return Ok(());
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    *slot = trimmed.parse().map_err(|_| ConfigError::InvalidEnv {
        var: var.to_string(),
        value: raw.clone(),
    })?;
    Ok(())
}
