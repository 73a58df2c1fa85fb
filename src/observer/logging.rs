//! Built-in observers that need no rendering surface

use super::{EngineObserver, SearchTarget, Severity, StateSnapshot};

/// Observer that ignores every event (the engine default)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl EngineObserver for NoopObserver {}

/// Observer that turns every event into a `tracing` event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl EngineObserver for TracingObserver {
    fn on_state_changed(&self, snapshot: &StateSnapshot) {
        tracing::debug!(
            wal_records = snapshot.wal.len(),
            memtable_entries = snapshot.memtable.len(),
            sstables = ?snapshot.sstable_ids(),
            "state changed"
        );
    }

    fn on_search_step(&self, target: SearchTarget, key: &str) {
        tracing::trace!(%target, key, "checking");
    }

    fn on_search_result(&self, target: SearchTarget, key: &str, value: Option<&str>) {
        tracing::trace!(%target, key, found = value.is_some(), "checked");
    }

    fn on_log(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Error => tracing::warn!("{}", message),
            Severity::Action | Severity::Success => tracing::info!("{}", message),
            Severity::Info => tracing::debug!("{}", message),
        }
    }
}
