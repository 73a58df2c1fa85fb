//! Tests for line sessions
//!
//! These tests verify:
//! - Comments, blank lines and quit handling
//! - Bad lines become ERROR responses without ending the session
//! - Scripts run in order and stop at quit
//! - Each command's observer events are all queued when its reply is ready

use std::io::Cursor;

use embedkv::observer::{ChannelObserver, ObserverEvent, SearchTarget, Severity};
use embedkv::protocol::{format_response, handle_line, run_script, LineOutcome, Response};
use embedkv::{Config, Engine};

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_engine_with_limit(limit: usize) -> Engine {
    let config = Config::builder().memtable_max_entries(limit).build();
    Engine::new(config).unwrap()
}

fn reply(outcome: LineOutcome) -> String {
    match outcome {
        LineOutcome::Reply(response) => format_response(&response),
        other => panic!("expected a reply, got {:?}", other),
    }
}

// =============================================================================
// Line Handling Tests
// =============================================================================

#[test]
fn test_skip_and_quit_lines() {
    let mut engine = setup_engine_with_limit(5);

    assert_eq!(handle_line(&mut engine, ""), LineOutcome::Skip);
    assert_eq!(handle_line(&mut engine, "   # a comment"), LineOutcome::Skip);
    assert_eq!(handle_line(&mut engine, "QUIT"), LineOutcome::Quit);
    assert_eq!(handle_line(&mut engine, " exit "), LineOutcome::Quit);

    assert!(engine.snapshot().is_empty());
}

#[test]
fn test_bad_lines_become_error_replies() {
    let mut engine = setup_engine_with_limit(5);

    assert_eq!(
        reply(handle_line(&mut engine, "bogus")),
        "ERROR Protocol error: Unknown command: BOGUS"
    );
    assert_eq!(
        handle_line(&mut engine, "COMPACT"),
        LineOutcome::Reply(Response::error(
            "Insufficient input: need at least 2 SSTables to compact, found 0"
        ))
    );

    // Session keeps going
    assert_eq!(reply(handle_line(&mut engine, "PUT a 1")), "OK");
}

// =============================================================================
// Script Tests
// =============================================================================

#[test]
fn test_run_script_in_order_until_quit() {
    let script = "\
# fill the memtable
PUT a 1
PUT b 2

GET a
bogus
quit
PUT never 1
";
    let mut engine = setup_engine_with_limit(2);

    let responses = run_script(&mut engine, Cursor::new(script)).unwrap();
    let lines: Vec<String> = responses.iter().map(format_response).collect();

    assert_eq!(
        lines,
        vec![
            "OK".to_string(),
            "OK flushed to SSTable-0".to_string(),
            "OK 1".to_string(),
            "ERROR Protocol error: Unknown command: BOGUS".to_string(),
        ]
    );
    assert_eq!(engine.get("never").unwrap(), None);
}

// =============================================================================
// Event Ordering Tests
// =============================================================================

#[test]
fn test_events_are_queued_per_reply() {
    let (observer, events) = ChannelObserver::unbounded();
    let config = Config::builder().memtable_max_entries(2).build();
    let mut engine = Engine::with_observer(config, observer).unwrap();

    handle_line(&mut engine, "PUT a 1");
    let put_events: Vec<ObserverEvent> = events.try_iter().collect();
    assert_eq!(put_events.iter().filter(|e| e.is_state_change()).count(), 1);

    handle_line(&mut engine, "PUT b 2");
    let flush_events: Vec<ObserverEvent> = events.try_iter().collect();
    assert_eq!(flush_events.iter().filter(|e| e.is_state_change()).count(), 2);
    assert!(flush_events
        .iter()
        .any(|e| e.severity() == Some(Severity::Action)));

    assert!(matches!(
        handle_line(&mut engine, "# nothing"),
        LineOutcome::Skip
    ));
    assert_eq!(events.try_iter().count(), 0);

    handle_line(&mut engine, "GET a");
    let search: Vec<ObserverEvent> = events
        .try_iter()
        .filter(|e| {
            matches!(
                e,
                ObserverEvent::SearchStep { .. } | ObserverEvent::SearchResult { .. }
            )
        })
        .collect();
    assert_eq!(
        search,
        vec![
            ObserverEvent::SearchStep {
                target: SearchTarget::Memtable,
                key: "a".to_string(),
            },
            ObserverEvent::SearchResult {
                target: SearchTarget::Memtable,
                key: "a".to_string(),
                value: None,
            },
            ObserverEvent::SearchStep {
                target: SearchTarget::SSTable(0),
                key: "a".to_string(),
            },
            ObserverEvent::SearchResult {
                target: SearchTarget::SSTable(0),
                key: "a".to_string(),
                value: Some("1".to_string()),
            },
        ]
    );
    assert_eq!(events.try_iter().count(), 0);
}
