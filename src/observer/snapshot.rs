//! Point-in-time view of engine state, handed to observers

use std::fmt;
use std::sync::Arc;

use crate::memtable::Entry;
use crate::storage::SSTable;
use crate::wal::WalRecord;

/// Full engine state at one instant
///
/// SSTables are immutable, so the snapshot shares them by `Arc` instead of
/// copying their entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateSnapshot {
    /// WAL records of the current memtable generation, in write order
    pub wal: Vec<WalRecord>,

    /// Memtable entries, sorted by key
    pub memtable: Vec<Entry>,

    /// SSTables, oldest first
    pub sstables: Vec<Arc<SSTable>>,
}

impl StateSnapshot {
    /// Ids of the SSTables in the snapshot, oldest first
    pub fn sstable_ids(&self) -> Vec<u64> {
        self.sstables.iter().map(|t| t.id()).collect()
    }

    /// True when nothing has been written since the last reset
    pub fn is_empty(&self) -> bool {
        self.wal.is_empty() && self.memtable.is_empty() && self.sstables.is_empty()
    }
}

/// Renders as `wal=[..] memtable={..} SSTable-0={..} ...` on one line
impl fmt::Display for StateSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("wal=[")?;
        for (i, record) in self.wal.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", record)?;
        }
        f.write_str("] memtable=")?;
        write_entries(f, &self.memtable)?;
        for table in &self.sstables {
            write!(f, " {}=", table.name())?;
            write_entries(f, table.entries())?;
        }
        Ok(())
    }
}

fn write_entries(f: &mut fmt::Formatter<'_>, entries: &[Entry]) -> fmt::Result {
    f.write_str("{")?;
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{}:{}", entry.key, entry.value)?;
    }
    f.write_str("}")
}
