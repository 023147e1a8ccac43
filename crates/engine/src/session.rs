//! Game session: the state machine driven by a clock, with observers.
//!
//! All mutation funnels through `&mut GameSession`, so a jump is always
//! applied between two ticks and never in the middle of one. Observers get an
//! immutable world after every tick and after every phase transition.

use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use crate::clock::{FixedStepClock, Stepper};
use crate::core::{GameState, RandomSource, SimpleRng, World};
use crate::types::{ConfigError, GameAction, GameConfig, GameEvent, GamePhase};

/// Presentation-side listener.
pub trait WorldObserver {
    /// Called after every tick and every phase transition.
    fn on_world_changed(&mut self, world: &World);

    /// Called for each discrete event, before the matching `on_world_changed`.
    fn on_event(&mut self, _world: &World, _event: &GameEvent) {}
}

/// Clock + state machine + observers.
pub struct GameSession<C: Stepper = FixedStepClock, R: RandomSource = SimpleRng> {
    state: GameState<R>,
    clock: C,
    observers: Vec<Box<dyn WorldObserver>>,
    pending: Vec<GameEvent>,
}

impl GameSession<FixedStepClock, SimpleRng> {
    /// Session with the default clock for `config`.
    pub fn new(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        let state = GameState::new(config, seed)?;
        let clock = FixedStepClock::from_millis(config.tick_period_ms, config.max_catch_up_ticks);
        Ok(Self::with_parts(state, clock))
    }
}

impl<C: Stepper, R: RandomSource> GameSession<C, R> {
    pub fn with_parts(state: GameState<R>, clock: C) -> Self {
        Self {
            state,
            clock,
            observers: Vec::new(),
            pending: Vec::with_capacity(64),
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn WorldObserver>) {
        self.observers.push(observer);
    }

    pub fn state(&self) -> &GameState<R> {
        &self.state
    }

    pub fn world(&self) -> &World {
        self.state.world()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Start a round and the clock. Ignored while a round is in progress.
    pub fn start(&mut self, now: Instant) -> bool {
        if !self.state.start() {
            return false;
        }
        self.clock.start(now);
        self.notify(true);
        true
    }

    /// Jump between ticks. Ignored outside `Playing`.
    pub fn jump(&mut self) -> bool {
        if !self.state.jump() {
            return false;
        }
        self.notify(false);
        true
    }

    pub fn apply_action(&mut self, action: GameAction, now: Instant) -> bool {
        match action {
            GameAction::Jump => self.jump(),
            GameAction::Start => self.start(now),
        }
    }

    /// Run every tick due at `now`. Returns the number of ticks simulated.
    ///
    /// The clock stops as soon as the round leaves `Playing`.
    pub fn update(&mut self, now: Instant) -> u32 {
        let Self {
            state,
            clock,
            observers,
            pending,
        } = self;

        clock.pump(now, &mut || {
            state.tick();
            dispatch(state, observers, pending, true);
            if state.phase().is_playing() {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(())
            }
        })
    }

    /// Time until the next tick is due, `None` when the clock is stopped.
    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.clock.time_until_next(now)
    }

    /// Resize the play area between rounds; see [`GameState::set_play_area`].
    pub fn set_play_area(&mut self, width: f64, height: f64) -> Result<bool, ConfigError> {
        let changed = self.state.set_play_area(width, height)?;
        if changed {
            self.notify(true);
        }
        Ok(changed)
    }

    /// Stop the clock for teardown. No tick fires afterwards.
    pub fn stop(&mut self) {
        self.clock.stop();
    }

    fn notify(&mut self, world_changed: bool) {
        dispatch(
            &mut self.state,
            &mut self.observers,
            &mut self.pending,
            world_changed,
        );
    }
}

impl<C: Stepper, R: RandomSource> Drop for GameSession<C, R> {
    fn drop(&mut self) {
        self.clock.stop();
    }
}

fn dispatch<R: RandomSource>(
    state: &mut GameState<R>,
    observers: &mut [Box<dyn WorldObserver>],
    pending: &mut Vec<GameEvent>,
    world_changed: bool,
) {
    pending.extend(state.drain_events());
    let world = state.world();
    for event in pending.iter() {
        for observer in observers.iter_mut() {
            observer.on_event(world, event);
        }
    }
    pending.clear();

    if world_changed {
        for observer in observers.iter_mut() {
            observer.on_world_changed(world);
        }
    }
}
