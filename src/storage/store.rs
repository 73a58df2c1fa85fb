//! SSTable Store
//!
//! Owns the ordered set of SSTables and the id counter they share.
//!
//! ## Responsibilities
//! - Create new SSTables from memtable flushes
//! - Keep tables ordered oldest → newest
//! - Hand out tables newest → oldest for reads
//! - Replace the whole set on compaction

use std::sync::Arc;

use crate::error::{EmbedError, Result};
use crate::memtable::Entry;

use super::compaction::{merge_tables, CompactionResult, MIN_COMPACTION_INPUTS};
use super::SSTable;

/// Ordered collection of SSTables
///
/// Invariant: ids are strictly increasing from oldest to newest and never
/// reused, including across compaction.
#[derive(Debug, Default)]
pub struct SSTableStore {
    /// Tables ordered oldest → newest
    sstables: Vec<Arc<SSTable>>,

    /// Next id handed to a flushed or compacted table
    next_sstable_id: u64,
}

impl SSTableStore {
    /// Create an empty store; the first table gets id 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next id from the shared counter
    pub fn allocate_id(&mut self) -> u64 {
        let id = self.next_sstable_id;
        self.next_sstable_id += 1;
        id
    }

    /// Append a table at the newest position
    ///
    /// Tables must arrive in id order; the id is not re-checked here
    /// beyond a debug assertion.
    pub fn append(&mut self, sstable: Arc<SSTable>) {
        debug_assert!(
            self.sstables.last().map_or(true, |last| last.id() < sstable.id()),
            "SSTable ids must be strictly increasing"
        );
        self.sstables.push(sstable);
    }

    /// Build a new table from sorted memtable entries and append it
    pub fn flush_entries(&mut self, entries: Vec<Entry>) -> Arc<SSTable> {
        let id = self.allocate_id();
        let table = Arc::new(SSTable::new(id, entries));
        self.append(Arc::clone(&table));
        tracing::debug!(
            sstable_id = id,
            entries = table.len(),
            "flushed memtable to SSTable"
        );
        table
    }

    /// All tables, oldest first
    pub fn all(&self) -> &[Arc<SSTable>] {
        &self.sstables
    }

    /// All tables, newest first (read order)
    pub fn newest_first(&self) -> impl Iterator<Item = &Arc<SSTable>> + '_ {
        self.sstables.iter().rev()
    }

    /// Merge every table into one, replacing the store contents
    ///
    /// Fails with `InsufficientInput` (and leaves the store untouched) when
    /// fewer than two tables are present.
    pub fn compact(&mut self) -> Result<CompactionResult> {
        let found = self.sstables.len();
        if found < MIN_COMPACTION_INPUTS {
            return Err(EmbedError::InsufficientInput {
                required: MIN_COMPACTION_INPUTS,
                found,
            });
        }

        let merged = merge_tables(&self.sstables);
        let consumed_ids: Vec<u64> = self.sstables.iter().map(|t| t.id()).collect();
        let input_entries = self.total_entries();

        let id = self.allocate_id();
        let table = Arc::new(SSTable::new(id, merged));

        // Old tables are dropped here; nothing else holds them for long
        self.sstables = vec![Arc::clone(&table)];

        let result = CompactionResult {
            output_entries: table.len(),
            table,
            consumed_ids,
            input_entries,
        };

        tracing::info!(
            sstable_id = id,
            tables_merged = result.consumed_ids.len(),
            input_entries = result.input_entries,
            output_entries = result.output_entries,
            shadowed = result.shadowed_entries(),
            "compaction complete"
        );

        Ok(result)
    }

    /// Drop every table and rewind the id counter
    pub fn reset(&mut self) {
        self.sstables.clear();
        self.next_sstable_id = 0;
    }

    /// Get the number of SSTables
    pub fn sstable_count(&self) -> usize {
        self.sstables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sstables.is_empty()
    }

    /// Sum of entries over all tables (shadowed versions included)
    pub fn total_entries(&self) -> usize {
        self.sstables.iter().map(|t| t.len()).sum()
    }

    /// Get the next SSTable ID (for testing/debugging)
    pub fn next_id(&self) -> u64 {
        self.next_sstable_id
    }
}
