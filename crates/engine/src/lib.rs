//! Engine crate: time and orchestration around the core state machine.
//!
//! - [`clock`]: fixed-step tick source with a catch-up cap
//! - [`session`]: clock + state machine + observers, the single mutation point
//! - [`trace`]: JSON-lines event trace (`FLAPPY_TRACE_PATH`)
//! - [`autopilot`]: gap-following bot
//! - [`headless`]: virtual-clock runner used by `tui-flappy headless`
//!
//! Nothing here touches the terminal; the `term` and `input` crates sit on top.

pub mod autopilot;
pub mod clock;
pub mod headless;
pub mod session;
pub mod trace;

pub use tui_flappy_core as core;
pub use tui_flappy_types as types;

pub use autopilot::Autopilot;
pub use clock::{FixedStepClock, Stepper};
pub use headless::{parse_headless_args, run_headless, HeadlessOptions, HeadlessReport};
pub use session::{GameSession, WorldObserver};
pub use trace::{EventTrace, TRACE_PATH_ENV};
