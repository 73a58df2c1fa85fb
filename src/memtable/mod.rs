//! MemTable Module
//!
//! In-memory data structure for recent writes.
//!
//! ## Responsibilities
//! - Fast point reads and writes in memory
//! - Track entry count for the flush trigger
//! - Ordered iteration for SSTable creation
//!
//! ## Data Structure Choice
//! BTreeMap keeps keys ordered, so a flush snapshot is already sorted and
//! needs no extra pass.

mod table;

pub use table::MemTable;

/// A single key/value pair, as stored in memtables and SSTables
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl From<(String, String)> for Entry {
    fn from((key, value): (String, String)) -> Self {
        Self { key, value }
    }
}

impl From<(&str, &str)> for Entry {
    fn from((key, value): (&str, &str)) -> Self {
        Self::new(key, value)
    }
}
