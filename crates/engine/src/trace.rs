//! JSON-lines event trace.
//!
//! Each [`GameEvent`] becomes one line:
//!
//! ```text
//! {"round":1,"tick":121,"phase":"playing","score":1,"event":{"type":"scored","score":1}}
//! ```
//!
//! The trace is best-effort. The first write failure disables it and is kept
//! for the caller to inspect; the game itself never sees the error.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::core::World;
use crate::session::WorldObserver;
use crate::types::{GameEvent, GamePhase};

/// Env var naming the trace file. Unset or blank disables tracing.
pub const TRACE_PATH_ENV: &str = "FLAPPY_TRACE_PATH";

#[derive(Serialize)]
struct TraceRecord<'a> {
    round: u32,
    tick: u64,
    phase: GamePhase,
    score: u32,
    event: &'a GameEvent,
}

/// Observer that appends events to a writer.
pub struct EventTrace<W: Write> {
    out: Option<W>,
    buf: Vec<u8>,
    error: Option<io::Error>,
}

impl EventTrace<BufWriter<File>> {
    /// Open the file named by `FLAPPY_TRACE_PATH` in append mode.
    pub fn from_env() -> io::Result<Option<Self>> {
        let path = std::env::var(TRACE_PATH_ENV)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        match path {
            Some(path) => Self::open(path).map(Some),
            None => Ok(None),
        }
    }

    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> EventTrace<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Some(out),
            buf: Vec::with_capacity(256),
            error: None,
        }
    }

    /// First write error, if tracing was disabled by one.
    pub fn error(&self) -> Option<&io::Error> {
        self.error.as_ref()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        match self.out.as_mut() {
            Some(out) => out.flush(),
            None => Ok(()),
        }
    }

    /// Flush and hand back the writer, or the error that disabled tracing.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.flush_or_disable();
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "trace writer closed"))
    }

    fn flush_or_disable(&mut self) {
        if let Err(err) = self.flush() {
            self.error = Some(err);
            self.out = None;
        }
    }

    fn record(&mut self, world: &World, event: &GameEvent) {
        let Some(out) = self.out.as_mut() else {
            return;
        };

        self.buf.clear();
        let record = TraceRecord {
            round: world.round,
            tick: world.tick,
            phase: world.phase,
            score: world.score,
            event,
        };
        if serde_json::to_writer(&mut self.buf, &record).is_err() {
            return;
        }
        self.buf.push(b'\n');

        if let Err(err) = out.write_all(&self.buf) {
            self.error = Some(err);
            self.out = None;
        }
    }
}

impl<W: Write> WorldObserver for EventTrace<W> {
    fn on_world_changed(&mut self, world: &World) {
        // Flush at round boundaries so an aborted process still leaves whole rounds behind.
        if world.phase == GamePhase::Ended {
            self.flush_or_disable();
        }
    }

    fn on_event(&mut self, world: &World, event: &GameEvent) {
        self.record(world, event);
    }
}
