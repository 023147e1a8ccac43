//! Terminal Flappy runner (default binary).
//!
//! `tui-flappy [--seed N]` plays in the terminal using crossterm for input and
//! a framebuffer-based renderer. `tui-flappy headless [--ticks N] [--seed N]
//! [--autopilot]` runs one round without a terminal and prints a JSON report.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use tui_flappy::cli::{load_config, parse_args, Command};
use tui_flappy::engine::{
    run_headless, EventTrace, GameSession, HeadlessOptions, WorldObserver,
};
use tui_flappy::input::{handle_key_event, should_quit};
use tui_flappy::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_flappy::types::GameConfig;

/// Poll interval while no round is running.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_args(&args)?;
    let config = load_config()?;

    match command {
        Command::Headless(opts) => headless(config, opts),
        Command::Play { seed } => play(config, seed.unwrap_or_else(clock_seed)),
    }
}

fn trace_observers() -> Result<Vec<Box<dyn WorldObserver>>> {
    let trace = EventTrace::from_env().context("opening FLAPPY_TRACE_PATH")?;
    Ok(trace
        .into_iter()
        .map(|t| Box::new(t) as Box<dyn WorldObserver>)
        .collect())
}

fn headless(config: GameConfig, opts: HeadlessOptions) -> Result<()> {
    let report = run_headless(config, opts, trace_observers()?)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn play(config: GameConfig, seed: u32) -> Result<()> {
    let mut session = GameSession::new(config, seed).context("invalid game config")?;
    for observer in trace_observers()? {
        session.add_observer(observer);
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    session.stop();
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, session: &mut GameSession) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut dirty = true;

    loop {
        if session.update(Instant::now()) > 0 {
            dirty = true;
        }

        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(
                session.world(),
                session.state().config(),
                Viewport::new(w, h),
                &mut fb,
            );
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        // Input with timeout until next tick.
        let timeout = session
            .time_until_next_tick(Instant::now())
            .unwrap_or(IDLE_POLL);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key, session.phase()) {
                        if session.apply_action(action, Instant::now()) {
                            dirty = true;
                        }
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
