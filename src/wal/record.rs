//! WAL record definitions
//!
//! Defines the structure of individual WAL records.

use std::fmt;

/// A single write record in the WAL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalRecord {
    /// Log Sequence Number - monotonically increasing
    pub lsn: u64,

    pub key: String,

    pub value: String,
}

impl WalRecord {
    pub fn new(lsn: u64, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            lsn,
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Renders as `PUT(key, value)`, the form shown to observers
impl fmt::Display for WalRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PUT({}, {})", self.key, self.value)
    }
}
