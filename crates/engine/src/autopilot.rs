//! Simple gap-following autopilot for demos and headless runs.
//!
//! It aims for the lower part of the next unscored gap and jumps whenever the
//! bird is falling below that line. It is not guaranteed to survive abrupt
//! gap changes.

use crate::core::World;
use crate::types::{GameAction, GameConfig, GamePhase};

/// Share of the gap height kept as clearance above the lower barrier.
const LOWER_CLEARANCE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Autopilot {
    clearance: f64,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            clearance: LOWER_CLEARANCE,
        }
    }
}

impl Autopilot {
    /// Lowest allowed position for the bird's bottom edge.
    pub fn jump_line(&self, world: &World, config: &GameConfig) -> f64 {
        let gap_bottom = match world.next_obstacle() {
            Some(o) => o.gap_bottom(config.gap_height),
            None => (config.play_area_height + config.gap_height) / 2.0,
        };
        gap_bottom - self.clearance * config.gap_height
    }

    /// Action to apply before the next tick, if any.
    pub fn decide(&self, world: &World, config: &GameConfig) -> Option<GameAction> {
        if world.phase != GamePhase::Playing {
            return None;
        }
        let bird = &world.bird;
        let falling = bird.velocity >= 0.0;
        let bottom = bird.y + config.bird_size;
        (falling && bottom > self.jump_line(world, config)).then_some(GameAction::Jump)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Bird, Obstacle};

    fn world_with_gap(top_height: f64) -> World {
        let mut world = World::default();
        world.phase = GamePhase::Playing;
        world.obstacles.push(Obstacle {
            x: 250.0,
            top_height,
            bottom_height: 600.0 - top_height - 200.0,
            passed: false,
        });
        world
    }

    #[test]
    fn test_idle_world_never_jumps() {
        let config = GameConfig::default();
        let mut world = World::default();
        world.bird.y = 590.0;
        assert_eq!(Autopilot::default().decide(&world, &config), None);
    }

    #[test]
    fn test_jumps_when_falling_below_line() {
        let config = GameConfig::default();
        // Gap [100, 300): jump line at 300 - 20 = 280.
        let mut world = world_with_gap(100.0);
        world.bird = Bird {
            x: 100.0,
            y: 260.0,
            velocity: 1.0,
        };
        let pilot = Autopilot::default();
        assert_eq!(pilot.jump_line(&world, &config), 280.0);
        assert_eq!(pilot.decide(&world, &config), Some(GameAction::Jump));
    }

    #[test]
    fn test_holds_while_rising_or_above_line() {
        let config = GameConfig::default();
        let pilot = Autopilot::default();
        let mut world = world_with_gap(100.0);

        world.bird = Bird {
            x: 100.0,
            y: 260.0,
            velocity: -3.0,
        };
        assert_eq!(pilot.decide(&world, &config), None);

        world.bird = Bird {
            x: 100.0,
            y: 200.0,
            velocity: 4.0,
        };
        assert_eq!(pilot.decide(&world, &config), None);
    }

    #[test]
    fn test_targets_center_without_obstacles() {
        let config = GameConfig::default();
        let mut world = World::default();
        world.phase = GamePhase::Playing;
        // (600 + 200) / 2 - 20
        assert_eq!(Autopilot::default().jump_line(&world, &config), 380.0);
    }
}
