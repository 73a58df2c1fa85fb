//! Recording observer
//!
//! Captures every event as an owned `ObserverEvent`, in order. Clones share
//! the same buffer, so a test can hand one clone to the engine and inspect
//! the other.

use std::sync::Arc;

use parking_lot::Mutex;

use super::{EngineObserver, SearchTarget, Severity, StateSnapshot};

/// Owned form of one observer callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObserverEvent {
    StateChanged(StateSnapshot),
    SearchStep {
        target: SearchTarget,
        key: String,
    },
    SearchResult {
        target: SearchTarget,
        key: String,
        value: Option<String>,
    },
    Log {
        message: String,
        severity: Severity,
    },
}

impl ObserverEvent {
    pub fn is_state_change(&self) -> bool {
        matches!(self, ObserverEvent::StateChanged(_))
    }

    /// Severity, for log events
    pub fn severity(&self) -> Option<Severity> {
        match self {
            ObserverEvent::Log { severity, .. } => Some(*severity),
            _ => None,
        }
    }
}

/// Observer that records every event it receives
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<ObserverEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all events recorded so far
    pub fn events(&self) -> Vec<ObserverEvent> {
        self.events.lock().clone()
    }

    /// Remove and return all events recorded so far
    pub fn take(&self) -> Vec<ObserverEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }

    /// Search steps and results only, in order
    pub fn search_events(&self) -> Vec<ObserverEvent> {
        self.events
            .lock()
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    ObserverEvent::SearchStep { .. } | ObserverEvent::SearchResult { .. }
                )
            })
            .cloned()
            .collect()
    }

    /// Log messages with the given severity, in order
    pub fn logs(&self, severity: Severity) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                ObserverEvent::Log { message, severity: s } if *s == severity => {
                    Some(message.clone())
                }
                _ => None,
            })
            .collect()
    }

    /// Most recent snapshot, if any state change was recorded
    pub fn last_snapshot(&self) -> Option<StateSnapshot> {
        self.events.lock().iter().rev().find_map(|e| match e {
            ObserverEvent::StateChanged(snapshot) => Some(snapshot.clone()),
            _ => None,
        })
    }

    fn push(&self, event: ObserverEvent) {
        self.events.lock().push(event);
    }
}

impl EngineObserver for RecordingObserver {
    fn on_state_changed(&self, snapshot: &StateSnapshot) {
        self.push(ObserverEvent::StateChanged(snapshot.clone()));
    }

    fn on_search_step(&self, target: SearchTarget, key: &str) {
        self.push(ObserverEvent::SearchStep {
            target,
            key: key.to_string(),
        });
    }

    fn on_search_result(&self, target: SearchTarget, key: &str, value: Option<&str>) {
        self.push(ObserverEvent::SearchResult {
            target,
            key: key.to_string(),
            value: value.map(str::to_string),
        });
    }

    fn on_log(&self, message: &str, severity: Severity) {
        self.push(ObserverEvent::Log {
            message: message.to_string(),
            severity,
        });
    }
}
