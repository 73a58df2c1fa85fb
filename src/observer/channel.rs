//! Channel observer
//!
//! Forwards events to another thread, typically a renderer that applies
//! cosmetic step delays without holding up the engine.

use crossbeam::channel::{self, Receiver, Sender};

use super::{EngineObserver, ObserverEvent, SearchTarget, Severity, StateSnapshot};

/// Observer that sends owned events over a crossbeam channel
///
/// Once the receiving side hangs up, events are silently dropped.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: Sender<ObserverEvent>,
}

impl ChannelObserver {
    pub fn new(tx: Sender<ObserverEvent>) -> Self {
        Self { tx }
    }

    /// Create an observer together with the receiving end of an unbounded channel
    pub fn unbounded() -> (Self, Receiver<ObserverEvent>) {
        let (tx, rx) = channel::unbounded();
        (Self::new(tx), rx)
    }

    fn send(&self, event: ObserverEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("observer channel closed, dropping event");
        }
    }
}

impl EngineObserver for ChannelObserver {
    fn on_state_changed(&self, snapshot: &StateSnapshot) {
        self.send(ObserverEvent::StateChanged(snapshot.clone()));
    }

    fn on_search_step(&self, target: SearchTarget, key: &str) {
        self.send(ObserverEvent::SearchStep {
            target,
            key: key.to_string(),
        });
    }

    fn on_search_result(&self, target: SearchTarget, key: &str, value: Option<&str>) {
        self.send(ObserverEvent::SearchResult {
            target,
            key: key.to_string(),
            value: value.map(str::to_string),
        });
    }

    fn on_log(&self, message: &str, severity: Severity) {
        self.send(ObserverEvent::Log {
            message: message.to_string(),
            severity,
        });
    }
}
