//! Collision & scoring detector
//!
//! Evaluates the post-tick world. The detector never mutates its inputs: it
//! reports the collision (if any) and the indices of obstacles that became
//! passed this tick, and the state machine applies both.
//!
//! Spans are half-open: the bird covers `[x, x + bird_size)` horizontally and
//! `[y, y + bird_size)` vertically; an obstacle covers `[x, x + pipe_width)` and
//! its gap is `[top_height, top_height + gap_height)`.

use arrayvec::ArrayVec;

use crate::types::{CollisionCause, GameConfig, MAX_OBSTACLES};
use crate::world::{Bird, Obstacle};

/// Sizes the detector needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub play_area_height: f64,
    pub bird_size: f64,
    pub pipe_width: f64,
    pub gap_height: f64,
}

impl From<&GameConfig> for Geometry {
    fn from(config: &GameConfig) -> Self {
        Self {
            play_area_height: config.play_area_height,
            bird_size: config.bird_size,
            pipe_width: config.pipe_width,
            gap_height: config.gap_height,
        }
    }
}

/// Result of one detection pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Detection {
    pub collision: Option<CollisionCause>,
    /// Indices into the evaluated obstacle slice, ascending.
    pub newly_passed: ArrayVec<usize, MAX_OBSTACLES>,
}

impl Detection {
    pub fn collided(&self) -> bool {
        self.collision.is_some()
    }
}

/// Check bounds, obstacle overlap, and passes for the current state.
pub fn detect(bird: &Bird, obstacles: &[Obstacle], geometry: &Geometry) -> Detection {
    let collision = boundary_collision(bird, geometry).or_else(|| {
        obstacles
            .iter()
            .any(|o| hits_obstacle(bird, o, geometry))
            .then_some(CollisionCause::Pipe)
    });

    let mut newly_passed = ArrayVec::new();
    for (i, o) in obstacles.iter().enumerate() {
        if is_newly_passed(bird, o, geometry.pipe_width) && newly_passed.try_push(i).is_err() {
            break;
        }
    }

    Detection {
        collision,
        newly_passed,
    }
}

/// Ceiling at `y <= 0`, floor at `y + bird_size >= play_area_height`.
pub fn boundary_collision(bird: &Bird, geometry: &Geometry) -> Option<CollisionCause> {
    if bird.y <= 0.0 {
        Some(CollisionCause::Ceiling)
    } else if bird.y + geometry.bird_size >= geometry.play_area_height {
        Some(CollisionCause::Floor)
    } else {
        None
    }
}

/// True when the spans overlap horizontally and the bird is not fully inside the gap.
pub fn hits_obstacle(bird: &Bird, obstacle: &Obstacle, geometry: &Geometry) -> bool {
    let overlaps_x = bird.x < obstacle.right_edge(geometry.pipe_width)
        && obstacle.x < bird.x + geometry.bird_size;
    if !overlaps_x {
        return false;
    }

    let inside_gap = bird.y >= obstacle.top_height
        && bird.y + geometry.bird_size <= obstacle.gap_bottom(geometry.gap_height);
    !inside_gap
}

/// Strictly behind: an obstacle whose right edge equals `bird.x` has not been passed yet.
pub fn is_newly_passed(bird: &Bird, obstacle: &Obstacle, pipe_width: f64) -> bool {
    !obstacle.passed && obstacle.right_edge(pipe_width) < bird.x
}
