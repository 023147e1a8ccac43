//! Clock/Stepper: decides when fixed ticks are due.
//!
//! The clock is pull-based. The runner pumps it with monotonic instants and
//! it invokes the tick callback once per elapsed period. It holds no game state.
//!
//! After [`Stepper::stop`] no tick fires, no matter how much time has passed.
//! A callback can stop the clock itself by returning [`ControlFlow::Break`];
//! ticks that were still due in that pump are discarded.

use std::ops::ControlFlow;
use std::time::{Duration, Instant};

/// Fixed-rate tick source.
pub trait Stepper {
    /// Begin ticking; the first tick is due one period after `now`.
    fn start(&mut self, now: Instant);

    /// Stop ticking. Idempotent.
    fn stop(&mut self);

    fn is_running(&self) -> bool;

    /// Fire every tick due at `now`. Returns the number of ticks fired.
    fn pump(&mut self, now: Instant, on_tick: &mut dyn FnMut() -> ControlFlow<()>) -> u32;

    /// Time left until the next tick, or `None` when stopped.
    fn time_until_next(&self, now: Instant) -> Option<Duration>;
}

/// Accumulator clock with a catch-up cap.
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    period: Duration,
    max_catch_up: u32,
    next_due: Option<Instant>,
}

impl FixedStepClock {
    pub fn new(period: Duration, max_catch_up: u32) -> Self {
        Self {
            period,
            max_catch_up: max_catch_up.max(1),
            next_due: None,
        }
    }

    pub fn from_millis(period_ms: u64, max_catch_up: u32) -> Self {
        Self::new(Duration::from_millis(period_ms.max(1)), max_catch_up)
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Stepper for FixedStepClock {
    fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    fn stop(&mut self) {
        self.next_due = None;
    }

    fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    fn pump(&mut self, now: Instant, on_tick: &mut dyn FnMut() -> ControlFlow<()>) -> u32 {
        let mut fired = 0;
        while let Some(due) = self.next_due {
            if due > now {
                break;
            }
            if fired == self.max_catch_up {
                // Stalled: drop the backlog and resume the cadence from now.
                self.next_due = Some(now + self.period);
                break;
            }

            self.next_due = Some(due + self.period);
            fired += 1;
            if on_tick().is_break() {
                self.stop();
            }
        }
        fired
    }

    fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}
