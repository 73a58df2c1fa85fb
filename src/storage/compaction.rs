//! Compaction
//!
//! Merges every SSTable in the store into one. Tables are folded oldest to
//! newest into a key-ordered buffer, so for a key present in several tables
//! the value from the newest table survives (last-writer-wins by recency).
//!
//! Compaction is not incremental or tiered: the whole set of tables is
//! consumed and replaced by the single result.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::memtable::Entry;

use super::SSTable;

/// Fewest tables a compaction accepts
pub const MIN_COMPACTION_INPUTS: usize = 2;

/// Result of a compaction operation.
#[derive(Debug, Clone)]
pub struct CompactionResult {
    /// The merged table, now the only one in the store
    pub table: Arc<SSTable>,
    /// Ids of the consumed tables, oldest first
    pub consumed_ids: Vec<u64>,
    /// Total entries across all inputs
    pub input_entries: usize,
    /// Entries in the merged table
    pub output_entries: usize,
}

impl CompactionResult {
    /// Number of stale versions dropped by the merge
    pub fn shadowed_entries(&self) -> usize {
        self.input_entries.saturating_sub(self.output_entries)
    }
}

/// Merge tables given oldest first into one sorted entry list
///
/// Later tables overwrite earlier values for the same key.
pub fn merge_tables(tables: &[Arc<SSTable>]) -> Vec<Entry> {
    let mut merged: BTreeMap<&str, &str> = BTreeMap::new();

    for table in tables {
        for entry in table.entries() {
            merged.insert(entry.key.as_str(), entry.value.as_str());
        }
    }

    merged
        .into_iter()
        .map(|(key, value)| Entry::new(key, value))
        .collect()
}
