//! イベントキューの結合テスト

use reload_core::{
    BreakpointLookup, DebugEvent, EventQueue, EventRequestManager, LineBreakpoint, LocationMatcher,
    Polled, ReloadThread, StepDepth, SuspendMode, ThreadState, Workspace, WorkspaceBreakpoints,
};
use serde_json::json;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

struct Bridge {
    queue: EventQueue,
    requests: Arc<EventRequestManager>,
    thread: Arc<ReloadThread>,
}

fn bridge_with(lookup: Arc<dyn BreakpointLookup>) -> Bridge {
    let matcher = LocationMatcher::new(Workspace::new("/workspace/project"), lookup);
    let requests = Arc::new(EventRequestManager::new());
    let thread = Arc::new(ReloadThread::new(1, "main"));
    let queue = EventQueue::new(matcher, requests.clone(), thread.clone());
    Bridge {
        queue,
        requests,
        thread,
    }
}

fn bridge() -> Bridge {
    let ws = Workspace::new("/workspace/project");
    bridge_with(Arc::new(WorkspaceBreakpoints::new(ws)))
}

#[test]
fn scenario_a_breakpoint_hit() {
    let b = bridge();
    let id = b.requests.create_breakpoint_request("src/a.js", 10);

    b.queue
        .received_with("report-breakpoint", json!({"file": "src/a.js", "line": 10, "step": false}));
    let set = b.queue.remove().expect("event set");

    assert_eq!(set.len(), 1);
    match &set.events()[0] {
        DebugEvent::Breakpoint(e) => {
            assert_eq!(e.request.id, id);
            assert_eq!(e.location.to_string(), "src/a.js:10");
        }
        other => panic!("expected breakpoint event, got {:?}", other),
    }
    assert_eq!(b.thread.state(), ThreadState::Suspended(SuspendMode::Breakpoint));
}

#[test]
fn scenario_b_stepping_suppresses_breakpoint() {
    let b = bridge();
    b.requests.create_breakpoint_request("src/a.js", 10);

    b.queue
        .received_with("report-breakpoint", json!({"file": "src/a.js", "line": 10, "step": true}));
    let set = b.queue.remove().expect("event set");

    assert_eq!(set.breakpoint_events().count(), 0);
    assert!(!b.thread.is_suspended());
}

#[test]
fn scenario_c_step_request() {
    let b = bridge();
    let id = b.requests.create_step_request(1, StepDepth::Over);

    b.queue
        .received_with("report-breakpoint", json!({"file": "src/b.js", "line": 5}));
    let set = b.queue.remove().expect("event set");

    let steps: Vec<_> = set.step_events().collect();
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].request.id, id);
    assert_eq!(steps[0].location.to_string(), "src/b.js:5");
    assert_eq!(set.len(), 1);
    assert_eq!(b.thread.state(), ThreadState::Suspended(SuspendMode::Breakpoint));
}

#[test]
fn scenario_d_missing_line() {
    let b = bridge();
    b.requests.create_breakpoint_request("src/a.js", 10);
    b.requests.create_step_request(1, StepDepth::Into);

    b.queue
        .received_with("report-breakpoint", json!({"file": "src/a.js"}));
    let set = b.queue.remove().expect("event set");

    assert!(set.is_empty());
    assert!(!b.thread.is_suspended());
}

#[test]
fn test_missing_file_never_suspends() {
    let b = bridge();
    b.requests.create_step_request(1, StepDepth::Into);

    b.queue.received_with("report-breakpoint", json!({"line": 5}));
    let set = b.queue.remove().expect("event set");

    assert!(set.is_empty());
    assert_eq!(set.suspend_mode(), None);
    assert!(!b.thread.is_suspended());
}

#[test]
fn test_path_outside_workspace_still_completes_step() {
    let b = bridge();
    b.requests.create_breakpoint_request("../shared/lib.js", 4);
    let step = b.requests.create_step_request(1, StepDepth::Over);

    b.queue
        .received_with("report-breakpoint", json!({"file": "../shared/lib.js", "line": 4}));
    let set = b.queue.remove().expect("event set");

    assert_eq!(set.breakpoint_events().count(), 0);
    let steps: Vec<_> = set.step_events().collect();
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].request.id, step);
    assert_eq!(steps[0].location.to_string(), "../shared/lib.js:4");
    assert_eq!(b.thread.state(), ThreadState::Suspended(SuspendMode::Breakpoint));

    b.thread.resume();
    b.queue.received_with("report-breakpoint", json!({"file": "", "line": 4}));
    let set = b.queue.remove().expect("event set");
    assert_eq!(set.step_events().count(), 1);
    assert!(b.thread.is_suspended());
}

#[test]
fn scenario_e_timeout() {
    let b = bridge();
    let start = Instant::now();
    let polled = b.queue.remove_timeout(50);
    let elapsed = start.elapsed();

    assert_eq!(polled, Polled::TimedOut);
    assert!(elapsed >= Duration::from_millis(50));
    assert!(elapsed < Duration::from_secs(5), "waited {:?}", elapsed);
}

#[test]
fn test_step_events_independent_of_step_flag() {
    for step in [false, true] {
        let b = bridge();
        b.requests.create_step_request(1, StepDepth::Into);
        b.requests.create_step_request(1, StepDepth::Out);

        b.queue.received_with(
            "report-breakpoint",
            json!({"file": "lib/util.js", "line": 7, "step": step}),
        );
        let set = b.queue.remove().expect("event set");
        assert_eq!(set.step_events().count(), 2, "step = {}", step);

        let expected = if step { SuspendMode::Step } else { SuspendMode::Breakpoint };
        assert_eq!(b.thread.state(), ThreadState::Suspended(expected));
    }
}

#[test]
fn test_only_matching_requests_fire() {
    let b = bridge();
    let hit_relative = b.requests.create_breakpoint_request("src/a.js", 10);
    let hit_full = b.requests.create_breakpoint_request("/workspace/project/src/a.js", 10);
    b.requests.create_breakpoint_request("src/a.js", 12);
    b.requests.create_breakpoint_request("src/c.js", 10);
    b.requests.create_breakpoint_request("../outside.js", 10);

    b.queue
        .received_with("report-breakpoint", json!({"file": "src/a.js", "line": 10}));
    let set = b.queue.remove().expect("event set");

    let ids: Vec<_> = set.breakpoint_events().map(|e| e.request.id).collect();
    assert_eq!(ids, vec![hit_relative, hit_full]);
}

#[test]
fn test_fifo_single_producer() {
    let b = bridge();
    b.requests.create_step_request(1, StepDepth::Into);

    let sender = b.queue.sender();
    let producer = thread::spawn(move || {
        for line in 1..=20u32 {
            sender.received_with("report-breakpoint", json!({"file": "src/a.js", "line": line}));
        }
    });
    producer.join().unwrap();

    for line in 1..=20u32 {
        let set = b.queue.remove().expect("event set");
        assert_eq!(set.events()[0].location().line(), line);
    }
}

#[test]
fn test_consumer_blocks_until_producer_sends() {
    let b = bridge();
    b.requests.create_breakpoint_request("src/a.js", 3);

    let sender = b.queue.sender();
    let producer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(30));
        sender.received_with("report-breakpoint", json!({"file": "src/a.js", "line": 3}));
    });

    let polled = b.queue.remove_timeout(5_000);
    producer.join().unwrap();
    let set = polled.into_events().expect("event set");
    assert_eq!(set.breakpoint_events().count(), 1);
}

#[test]
fn test_bad_notifications_never_stall_the_poll_loop() {
    let b = bridge();
    b.requests.create_breakpoint_request("src/a.js", 10);

    b.queue.received_with("report-breakpoint", json!({"file": "src/a.js", "line": "ten"}));
    b.queue.received_with("report-breakpoint", json!({"file": "src/a.js", "line": -3}));
    b.queue.received_with("report-breakpoint", json!(42));
    b.queue.received_with("report-breakpoint", json!({"file": "src/a.js", "line": 10}));

    assert_eq!(b.queue.remove(), None);
    assert_eq!(b.queue.remove_timeout(1_000), Polled::NoEvent);
    assert_eq!(b.queue.remove_timeout(0), Polled::NoEvent);
    assert_eq!(b.queue.remove().expect("event set").len(), 1);
}

/// 定義を一切返さない検索サービス
struct NoDefinitions;

impl BreakpointLookup for NoDefinitions {
    fn find_breakpoint(&self, _path: &str, _line: u32) -> Option<LineBreakpoint> {
        None
    }
}

#[test]
fn test_missing_definition_never_matches() {
    let b = bridge_with(Arc::new(NoDefinitions));
    b.requests.create_breakpoint_request("src/a.js", 10);
    let step = b.requests.create_step_request(1, StepDepth::Over);

    b.queue
        .received_with("report-breakpoint", json!({"file": "src/a.js", "line": 10}));
    let set = b.queue.remove().expect("event set");

    assert_eq!(set.breakpoint_events().count(), 0);
    assert_eq!(set.step_events().map(|e| e.request.id).collect::<Vec<_>>(), vec![step]);
}
