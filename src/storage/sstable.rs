//! SSTable implementation
//!
//! Sorted String Table - immutable sorted key-value segment.

use std::collections::BTreeMap;

use crate::memtable::Entry;

/// Immutable, key-sorted segment produced by a flush or a compaction
///
/// Entries are kept in a sorted `Vec`, so lookups are a binary search and
/// iteration during compaction is a plain slice walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SSTable {
    id: u64,
    entries: Vec<Entry>,
}

impl SSTable {
    /// Build an SSTable from any key→value mapping
    ///
    /// Entries are sorted by key ascending. If a key appears more than once,
    /// the last occurrence wins.
    pub fn new<I, E>(id: u64, entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Entry>,
    {
        let sorted: BTreeMap<String, String> = entries
            .into_iter()
            .map(|e| {
                let Entry { key, value } = e.into();
                (key, value)
            })
            .collect();

        Self {
            id,
            entries: sorted.into_iter().map(Entry::from).collect(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Point lookup
    pub fn get(&self, key: &str) -> Option<&str> {
        if !self.might_contain(key) {
            return None;
        }
        self.entries
            .binary_search_by(|e| e.key.as_str().cmp(key))
            .ok()
            .map(|idx| self.entries[idx].value.as_str())
    }

    /// Entries in ascending key order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Smallest key, if any
    pub fn min_key(&self) -> Option<&str> {
        self.entries.first().map(|e| e.key.as_str())
    }

    /// Largest key, if any
    pub fn max_key(&self) -> Option<&str> {
        self.entries.last().map(|e| e.key.as_str())
    }

    /// Quick check if a key might be in this SSTable (range check)
    /// Returns false if key is definitely outside [min_key, max_key]
    pub fn might_contain(&self, key: &str) -> bool {
        match (self.min_key(), self.max_key()) {
            (Some(min), Some(max)) => key >= min && key <= max,
            _ => false,
        }
    }

    /// Display name, e.g. `SSTable-3`
    pub fn name(&self) -> String {
        format!("SSTable-{}", self.id)
    }
}
