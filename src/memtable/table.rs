//! MemTable implementation
//!
//! BTreeMap-based memtable, owned exclusively by the engine.

use std::collections::btree_map;
use std::collections::BTreeMap;

use super::Entry;

/// In-memory table for recent writes
#[derive(Debug, Default)]
pub struct MemTable {
    data: BTreeMap<String, String>,

    /// Approximate size in bytes (sum of key + value lengths)
    byte_size: usize,
}

impl MemTable {
    /// Create a new empty MemTable
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// Insert or overwrite a key-value pair
    ///
    /// Returns the entry count after the insert.
    pub fn put(&mut self, key: String, value: String) -> usize {
        let key_len = key.len();
        let value_len = value.len();
        match self.data.insert(key, value) {
            // Key already counted; only the value bytes change
            Some(old) => self.byte_size = self.byte_size - old.len() + value_len,
            None => self.byte_size += key_len + value_len,
        }
        self.data.len()
    }

    /// Number of entries
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether the entry count reached the flush threshold
    pub fn is_full(&self, threshold: usize) -> bool {
        self.data.len() >= threshold
    }

    /// Approximate size in bytes
    pub fn byte_size(&self) -> usize {
        self.byte_size
    }

    /// Borrowed iterator over entries in sorted key order
    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.data.iter()
    }

    /// Owned snapshot of all entries, sorted by key ascending (for flush)
    pub fn entries_sorted_by_key(&self) -> Vec<Entry> {
        self.data
            .iter()
            .map(|(k, v)| Entry::new(k.clone(), v.clone()))
            .collect()
    }

    /// Clear all entries (after a flush or reset)
    pub fn clear(&mut self) {
        self.data.clear();
        self.byte_size = 0;
    }
}
