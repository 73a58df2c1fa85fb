//! Observer Module
//!
//! The engine reports everything a presentation layer needs through the
//! `EngineObserver` trait: full state snapshots after each mutation, one
//! step/result pair per structure examined during a read, and user-facing
//! status messages.
//!
//! ## Event Protocol
//! ```text
//! put / flush / compact / reset ──► on_state_changed(snapshot)
//!
//! get(k) ──► on_search_step(Memtable, k)
//!            on_search_result(Memtable, k, None)
//!            on_search_step(SSTable(2), k)
//!            on_search_result(SSTable(2), k, Some(v))   <- stops at first hit
//!
//! anything ──► on_log(message, severity)
//! ```
//!
//! Observers take `&self`; implementations that collect state use interior
//! mutability. Rendering delays belong to observers, never to the engine.

mod channel;
mod logging;
mod recording;
mod snapshot;

use std::fmt;

pub use channel::ChannelObserver;
pub use logging::{NoopObserver, TracingObserver};
pub use recording::{ObserverEvent, RecordingObserver};
pub use snapshot::StateSnapshot;

/// Severity of a user-facing status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Success,
    Error,
    Action,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Action => "action",
        };
        f.write_str(label)
    }
}

/// A structure examined by the read path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchTarget {
    Memtable,
    SSTable(u64),
}

impl fmt::Display for SearchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchTarget::Memtable => f.write_str("MemTable"),
            SearchTarget::SSTable(id) => write!(f, "SSTable-{}", id),
        }
    }
}

/// Receives engine state changes and search progress
///
/// Every method has a no-op default so an observer only implements what it
/// renders.
pub trait EngineObserver: Send {
    /// Fired after every mutating operation with the full current state
    fn on_state_changed(&self, _snapshot: &StateSnapshot) {}

    /// Fired before a structure is probed for `key`
    fn on_search_step(&self, _target: SearchTarget, _key: &str) {}

    /// Fired after a structure was probed; `value` is `Some` on a hit
    fn on_search_result(&self, _target: SearchTarget, _key: &str, _value: Option<&str>) {}

    /// Fired for user-facing status text
    fn on_log(&self, _message: &str, _severity: Severity) {}
}
