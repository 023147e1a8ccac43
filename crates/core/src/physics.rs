//! Physics integrator.
//!
//! Pure transforms: each function takes the current value and returns the
//! next one. Callers replace their state wholesale.

use crate::world::{Bird, Obstacle, ObstacleList};

/// Advance the bird one step with semi-implicit Euler.
///
/// Velocity is updated first and the new velocity moves the bird, which keeps
/// arcs stable and reproducible at a fixed step.
pub fn step_bird(bird: Bird, gravity: f64, dt: f64) -> Bird {
    let velocity = bird.velocity + gravity * dt;
    Bird {
        y: bird.y + velocity * dt,
        velocity,
        ..bird
    }
}

/// Replace the vertical velocity with the jump impulse. Prior velocity is discarded.
pub fn apply_jump(bird: Bird, jump_force: f64) -> Bird {
    Bird {
        velocity: jump_force,
        ..bird
    }
}

/// Scroll every obstacle left by `speed * dt`, preserving order.
pub fn step_obstacles(obstacles: ObstacleList, speed: f64, dt: f64) -> ObstacleList {
    let dx = speed * dt;
    obstacles
        .into_iter()
        .map(|o| Obstacle { x: o.x - dx, ..o })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_bird_is_semi_implicit() {
        let bird = Bird {
            x: 100.0,
            y: 300.0,
            velocity: 2.5,
        };
        let next = step_bird(bird, 0.6, 1.0);
        let v = 2.5 + 0.6 * 1.0;
        assert_eq!(next.velocity, v);
        assert_eq!(next.y, 300.0 + v * 1.0);
        assert_eq!(next.x, 100.0);
    }

    #[test]
    fn test_step_bird_fractional_dt() {
        let bird = Bird::new(100.0, 50.0);
        let next = step_bird(bird, 0.6, 0.5);
        assert_eq!(next.velocity, 0.0 + 0.6 * 0.5);
        assert_eq!(next.y, 50.0 + next.velocity * 0.5);
    }

    #[test]
    fn test_jump_overwrites_velocity() {
        for v in [-30.0, -12.0, 0.0, 0.6, 25.0] {
            let bird = Bird {
                x: 100.0,
                y: 200.0,
                velocity: v,
            };
            let jumped = apply_jump(bird, -12.0);
            assert_eq!(jumped.velocity, -12.0);
            assert_eq!(jumped.y, 200.0);
        }
    }

    #[test]
    fn test_step_obstacles_moves_all_and_keeps_order() {
        let mut list = ObstacleList::new();
        for (i, x) in [10.0, 230.0, 400.0].into_iter().enumerate() {
            list.push(Obstacle {
                x,
                top_height: 100.0 + i as f64,
                bottom_height: 300.0 - i as f64,
                passed: i == 0,
            });
        }

        let moved = step_obstacles(list.clone(), 3.0, 1.0);
        assert_eq!(moved.len(), 3);
        for (before, after) in list.iter().zip(moved.iter()) {
            assert_eq!(after.x, before.x - 3.0);
            assert_eq!(after.top_height, before.top_height);
            assert_eq!(after.bottom_height, before.bottom_height);
            assert_eq!(after.passed, before.passed);
        }
    }
}
