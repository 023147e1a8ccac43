//! JSON shapes of the world snapshot, the event trace, and the headless report.

use std::time::{Duration, Instant};

use serde_json::Value;

use tui_flappy::core::GameState;
use tui_flappy::engine::{run_headless, EventTrace, GameSession, HeadlessOptions, WorldObserver};
use tui_flappy::types::{GameConfig, GameEvent};

#[test]
fn world_snapshot_has_stable_field_names() {
    let mut state = GameState::new(GameConfig::default(), 3).unwrap();
    state.start();
    state.tick();

    let v: Value = serde_json::to_value(state.snapshot()).unwrap();
    assert_eq!(v["phase"], "playing");
    assert_eq!(v["score"], 0);
    assert_eq!(v["tick"], 1);
    assert_eq!(v["round"], 1);
    assert_eq!(v["bird"]["x"], 100.0);
    assert!(v["bird"]["velocity"].is_f64());

    let obstacle = &v["obstacles"][0];
    for key in ["x", "top_height", "bottom_height", "passed"] {
        assert!(obstacle.get(key).is_some(), "missing {}", key);
    }
}

#[test]
fn game_events_are_internally_tagged() {
    let v = serde_json::to_value(GameEvent::Started { round: 2 }).unwrap();
    assert_eq!(v, serde_json::json!({"type": "started", "round": 2}));
    let v = serde_json::to_value(GameEvent::Jumped).unwrap();
    assert_eq!(v, serde_json::json!({"type": "jumped"}));
}

/// Observer wrapper so the test can read the trace after the session is dropped.
struct Shared(std::rc::Rc<std::cell::RefCell<EventTrace<Vec<u8>>>>);

impl WorldObserver for Shared {
    fn on_world_changed(&mut self, world: &tui_flappy::core::World) {
        self.0.borrow_mut().on_world_changed(world);
    }

    fn on_event(&mut self, world: &tui_flappy::core::World, event: &GameEvent) {
        self.0.borrow_mut().on_event(world, event);
    }
}

#[test]
fn session_trace_records_a_whole_round() {
    let trace = std::rc::Rc::new(std::cell::RefCell::new(EventTrace::new(Vec::new())));
    let mut session = GameSession::new(GameConfig::default(), 11).unwrap();
    session.add_observer(Box::new(Shared(trace.clone())));

    let t0 = Instant::now();
    session.start(t0);
    let mut now = t0;
    while session.is_running() {
        now += Duration::from_millis(16);
        session.update(now);
    }
    drop(session);

    let trace = std::rc::Rc::try_unwrap(trace).ok().unwrap().into_inner();
    let bytes = trace.into_inner().unwrap();
    let lines: Vec<Value> = std::str::from_utf8(&bytes)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["event"]["type"], "started");
    assert_eq!(lines[0]["tick"], 0);
    assert_eq!(lines[1]["event"]["type"], "collided");
    assert_eq!(lines[1]["event"]["cause"], "floor");
    assert_eq!(lines[1]["phase"], "ended");
    assert_eq!(lines[1]["tick"], 30);
}

#[test]
fn headless_report_serializes() {
    let report = run_headless(
        GameConfig::default(),
        HeadlessOptions {
            max_ticks: 50,
            seed: 6,
            autopilot: true,
        },
        Vec::new(),
    )
    .unwrap();

    let v = serde_json::to_value(&report).unwrap();
    assert_eq!(v["seed"], 6);
    assert_eq!(v["ticks"], 50);
    assert_eq!(v["ended"], false);
    assert_eq!(v["world"]["phase"], "playing");
    assert_eq!(v["events"][0]["type"], "started");
}
