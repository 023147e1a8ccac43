//! Integration tests for the simulation core and session.

use std::time::{Duration, Instant};

use tui_flappy::core::{
    detect, generate, Bird, GameState, Geometry, Obstacle, RandomSource, SequenceRng, SimpleRng,
};
use tui_flappy::engine::{Autopilot, GameSession};
use tui_flappy::types::{CollisionCause, GameConfig, GameEvent, GamePhase};

fn pipe(x: f64, top_height: f64) -> Obstacle {
    Obstacle {
        x,
        top_height,
        bottom_height: 600.0 - top_height - 200.0,
        passed: false,
    }
}

#[test]
fn test_one_tick_then_jump_scenario() {
    let mut state = GameState::new(GameConfig::default(), 12345).unwrap();
    state.start();
    assert_eq!(state.bird(), Bird::new(100.0, 300.0));

    state.tick();
    assert!((state.bird().velocity - 0.6).abs() < 1e-12);
    assert!((state.bird().y - 300.6).abs() < 1e-9);

    state.jump();
    assert_eq!(state.bird().velocity, -12.0);
    state.tick();
    assert!((state.bird().velocity - -11.4).abs() < 1e-12);
    assert!((state.bird().y - 289.2).abs() < 1e-9);
}

#[test]
fn test_every_tick_is_semi_implicit_euler() {
    let config = GameConfig::default();
    let mut state = GameState::new(config, 77).unwrap();
    let mut rng = SimpleRng::new(5);
    state.start();

    while state.phase() == GamePhase::Playing && state.world().tick < 2_000 {
        if rng.next_range(8) == 0 {
            state.jump();
            assert_eq!(state.bird().velocity, config.jump_force);
        }
        let before = state.bird();
        state.tick();

        let velocity = before.velocity + config.gravity * config.time_step;
        let y = before.y + velocity * config.time_step;
        assert_eq!(state.bird().velocity, velocity);
        assert_eq!(state.bird().y, y);
        assert_eq!(state.bird().x, before.x);
    }
}

#[test]
fn test_jump_overwrites_any_velocity() {
    let mut state = GameState::new(GameConfig::default(), 1).unwrap();
    state.start();
    for _ in 0..20 {
        state.tick();
    }
    assert!(state.bird().velocity > 10.0);
    state.jump();
    assert_eq!(state.bird().velocity, -12.0);
    state.jump();
    assert_eq!(state.bird().velocity, -12.0);
}

#[test]
fn test_generated_obstacles_respect_margins() {
    for seed in 0..200u32 {
        let mut rng = SimpleRng::new(seed);
        for _ in 0..20 {
            let o = generate(600.0, 200.0, 50.0, 400.0, &mut rng);
            assert_eq!(o.top_height + 200.0 + o.bottom_height, 600.0);
            assert!(o.top_height >= 50.0, "seed {} top {}", seed, o.top_height);
            assert!(o.bottom_height >= 50.0, "seed {} bottom {}", seed, o.bottom_height);
            assert!(!o.passed);
        }
    }
}

#[test]
fn test_score_counts_each_obstacle_once() {
    let config = GameConfig {
        gravity: 0.0,
        ..GameConfig::default()
    };
    // Every gap is [200, 400); a bird hovering at y=300 never collides.
    let mut state =
        GameState::with_rng(config, SequenceRng::new(vec![0x8000_0000])).unwrap();
    state.start();

    let mut scored = Vec::new();
    for _ in 0..1_000 {
        state.tick();
        for event in state.drain_events() {
            if let GameEvent::Scored { score } = event {
                scored.push(score);
            }
        }
    }

    assert_eq!(state.phase(), GamePhase::Playing);
    let expected: Vec<u32> = (1..=state.score()).collect();
    assert_eq!(scored, expected);
    assert!(state.score() >= 10);
    // Everything left of the bird is marked, nothing to the right is.
    for o in state.obstacles() {
        assert_eq!(o.passed, o.x + 60.0 < 100.0);
    }
}

#[test]
fn test_pass_tie_break_is_strict() {
    let geometry = Geometry::from(&GameConfig::default());
    let bird = Bird::new(100.0, 300.0);

    let d = detect(&bird, &[pipe(40.0, 200.0)], &geometry);
    assert!(d.newly_passed.is_empty());
    assert!(!d.collided());

    let d = detect(&bird, &[pipe(39.5, 200.0)], &geometry);
    assert_eq!(d.newly_passed.as_slice(), &[0]);
}

#[test]
fn test_two_obstacles_overlapping_the_bird() {
    let geometry = Geometry::from(&GameConfig::default());
    let bird = Bird::new(100.0, 250.0);
    let safe = pipe(75.0, 200.0);
    let clipping = pipe(110.0, 260.0);

    assert!(!detect(&bird, &[safe], &geometry).collided());
    assert_eq!(
        detect(&bird, &[safe, clipping], &geometry).collision,
        Some(CollisionCause::Pipe)
    );
}

#[test]
fn test_boundaries_end_the_round_on_the_same_tick() {
    let mut state = GameState::new(GameConfig::default(), 8).unwrap();
    state.start();
    let mut last_airborne_tick = 0;
    while state.phase() == GamePhase::Playing {
        last_airborne_tick = state.world().tick;
        state.tick();
    }
    let bird = state.bird();
    assert!(bird.y + 30.0 >= 600.0);
    assert_eq!(state.world().tick, last_airborne_tick + 1);
}

#[test]
fn test_restart_from_ended_fully_resets() {
    let mut state = GameState::new(GameConfig::default(), 21).unwrap();
    let pilot = Autopilot::default();
    state.start();

    for _ in 0..300 {
        if let Some(action) = pilot.decide(state.world(), state.config()) {
            state.apply_action(action);
        }
        state.tick();
    }
    // Dive into the floor to end the round.
    while state.phase() == GamePhase::Playing {
        state.tick();
    }
    assert_eq!(state.phase(), GamePhase::Ended);

    assert!(state.start());
    let world = state.world();
    assert_eq!(world.score, 0);
    assert_eq!(world.tick, 0);
    assert_eq!(world.obstacles.len(), 1);
    assert_eq!(world.obstacles[0].x, 400.0);
    assert!(!world.obstacles[0].passed);
    assert_eq!(world.bird, Bird::new(100.0, 300.0));
}

#[test]
fn test_session_never_ticks_after_stop() {
    let t0 = Instant::now();
    let period = Duration::from_millis(16);
    let mut session = GameSession::new(GameConfig::default(), 4).unwrap();

    assert_eq!(session.update(t0 + period * 3), 0);
    session.start(t0);
    assert_eq!(session.update(t0 + period * 2), 2);

    session.stop();
    assert_eq!(session.update(t0 + period * 50), 0);
    assert_eq!(session.world().tick, 2);
    assert_eq!(session.phase(), GamePhase::Playing);
}

#[test]
fn test_session_clock_stops_when_round_ends() {
    let t0 = Instant::now();
    let period = Duration::from_millis(16);
    let mut session = GameSession::new(GameConfig::default(), 4).unwrap();
    session.start(t0);

    let mut now = t0;
    while session.is_running() {
        now += period;
        session.update(now);
        assert!(session.world().tick <= 30);
    }
    assert_eq!(session.phase(), GamePhase::Ended);
    let frozen = session.world().clone();
    assert_eq!(session.update(now + period * 10), 0);
    assert_eq!(session.world(), &frozen);
}

#[test]
fn test_same_seed_same_obstacles() {
    let mut a = GameState::new(GameConfig::default(), 2024).unwrap();
    let mut b = GameState::new(GameConfig::default(), 2024).unwrap();
    a.start();
    b.start();
    for _ in 0..25 {
        a.tick();
        b.tick();
    }
    assert_eq!(a.snapshot(), b.snapshot());
}
