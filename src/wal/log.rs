//! In-memory write-ahead log

use super::WalRecord;

/// Append-only log of the writes in the current memtable generation
#[derive(Debug)]
pub struct WriteAheadLog {
    records: Vec<WalRecord>,

    /// LSN handed to the next appended record
    next_lsn: u64,
}

impl WriteAheadLog {
    /// First LSN handed out by a fresh log
    pub const INITIAL_LSN: u64 = 1;

    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_lsn: Self::INITIAL_LSN,
        }
    }

    /// Append a put record, returning its LSN
    pub fn append(&mut self, key: &str, value: &str) -> u64 {
        let lsn = self.next_lsn;
        self.next_lsn += 1;
        self.records.push(WalRecord::new(lsn, key, value));
        lsn
    }

    /// Drop every record of the current generation
    ///
    /// The LSN counter is not rewound.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Drop every record and rewind the LSN counter
    pub fn reset(&mut self) {
        self.records.clear();
        self.next_lsn = Self::INITIAL_LSN;
    }

    /// Records in write order
    pub fn records(&self) -> &[WalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// LSN of the most recent record ever appended, if any
    pub fn last_lsn(&self) -> Option<u64> {
        (self.next_lsn > Self::INITIAL_LSN).then(|| self.next_lsn - 1)
    }
}

impl Default for WriteAheadLog {
    fn default() -> Self {
        Self::new()
    }
}
