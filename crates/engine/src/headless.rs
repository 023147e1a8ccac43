//! Headless runner: drives a session on a virtual clock, no terminal.
//!
//! Useful for replaying a seed, smoke-testing a config, or feeding the event
//! trace without a TTY. Time advances exactly one period per step, so a run is
//! fully determined by config, seed, and options.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use serde::Serialize;

use crate::autopilot::Autopilot;
use crate::core::World;
use crate::session::{GameSession, WorldObserver};
use crate::types::{GameConfig, GameEvent, GamePhase};

pub const DEFAULT_HEADLESS_TICKS: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlessOptions {
    /// Upper bound on simulated ticks.
    pub max_ticks: u64,
    pub seed: u32,
    pub autopilot: bool,
}

impl Default for HeadlessOptions {
    fn default() -> Self {
        Self {
            max_ticks: DEFAULT_HEADLESS_TICKS,
            seed: 0,
            autopilot: false,
        }
    }
}

/// Outcome of one headless round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadlessReport {
    pub seed: u32,
    pub ticks: u64,
    pub score: u32,
    pub ended: bool,
    pub world: World,
    pub events: Vec<GameEvent>,
}

/// Parse `headless [--ticks N] [--seed N] [--autopilot]`.
///
/// Returns `Ok(None)` when the first argument is not `headless`.
pub fn parse_headless_args(args: &[String]) -> Result<Option<HeadlessOptions>> {
    if args.first().map(String::as_str) != Some("headless") {
        return Ok(None);
    }

    let mut opts = HeadlessOptions::default();
    let mut i = 1usize;
    while i < args.len() {
        match args[i].as_str() {
            "--ticks" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("headless: missing value for --ticks"))?;
                opts.max_ticks = v
                    .parse::<u64>()
                    .map_err(|_| anyhow!("headless: invalid --ticks value: {}", v))?;
            }
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("headless: missing value for --seed"))?;
                opts.seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("headless: invalid --seed value: {}", v))?;
            }
            "--autopilot" => opts.autopilot = true,
            other => {
                return Err(anyhow!("headless: unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(Some(opts))
}

#[derive(Default)]
struct EventLog(Rc<RefCell<Vec<GameEvent>>>);

impl WorldObserver for EventLog {
    fn on_world_changed(&mut self, _world: &World) {}

    fn on_event(&mut self, _world: &World, event: &GameEvent) {
        self.0.borrow_mut().push(*event);
    }
}

/// Play one round until it ends or `max_ticks` have been simulated.
///
/// `extra` observers (such as an event trace) see the run as a live session would.
pub fn run_headless(
    config: GameConfig,
    opts: HeadlessOptions,
    extra: Vec<Box<dyn WorldObserver>>,
) -> Result<HeadlessReport> {
    let mut session =
        GameSession::new(config, opts.seed).context("headless: invalid game config")?;

    let events = Rc::new(RefCell::new(Vec::new()));
    session.add_observer(Box::new(EventLog(events.clone())));
    for observer in extra {
        session.add_observer(observer);
    }

    let period = session.clock().period();
    let pilot = opts.autopilot.then(Autopilot::default);

    let mut now = Instant::now();
    session.start(now);
    while session.phase() == GamePhase::Playing && session.world().tick < opts.max_ticks {
        if let Some(pilot) = &pilot {
            if let Some(action) = pilot.decide(session.world(), session.state().config()) {
                session.apply_action(action, now);
            }
        }
        now += period.max(Duration::from_millis(1));
        session.update(now);
    }
    session.stop();

    let world = session.world().clone();
    drop(session);
    let events = events.take();

    Ok(HeadlessReport {
        seed: opts.seed,
        ticks: world.tick,
        score: world.score,
        ended: world.phase == GamePhase::Ended,
        world,
        events,
    })
}
