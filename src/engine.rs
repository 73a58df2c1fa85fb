//! Engine Module
//!
//! The core storage engine that coordinates all components.
//!
//! ## Responsibilities
//! - Validate input at the write boundary
//! - Log every write to the WAL before applying it to the MemTable
//! - Trigger a flush when the MemTable is full
//! - Search MemTable, then SSTables newest → oldest
//! - Delegate compaction to the SSTable store
//! - Report every state change and search step to the observer

use std::fmt;
use std::sync::Arc;

use crate::config::{Config, FlushMode};
use crate::error::{EmbedError, Result};
use crate::memtable::MemTable;
use crate::observer::{EngineObserver, NoopObserver, SearchTarget, Severity, StateSnapshot};
use crate::protocol::{Command, Response};
use crate::storage::{CompactionResult, SSTable, SSTableStore, MIN_COMPACTION_INPUTS};
use crate::wal::WriteAheadLog;

/// What a successful `put` did besides applying the write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PutOutcome {
    /// The write was applied; the memtable still has room
    Applied,

    /// The write filled the memtable and the flush already ran
    Flushed(Arc<SSTable>),

    /// The write filled the memtable; the flush runs before the next operation
    FlushScheduled,
}

/// A successful lookup and the structure that answered it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub source: SearchTarget,
    pub value: String,
}

/// Counters describing the engine's current state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineStats {
    pub memtable_entries: usize,
    pub memtable_bytes: usize,
    pub wal_records: usize,
    pub sstable_count: usize,
    /// Entries across all SSTables, shadowed versions included
    pub sstable_entries: usize,
    pub next_sstable_id: u64,
    pub flush_pending: bool,
}

impl fmt::Display for EngineStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "memtable={} ({} bytes) wal={} sstables={} sstable_entries={} next_id={}",
            self.memtable_entries,
            self.memtable_bytes,
            self.wal_records,
            self.sstable_count,
            self.sstable_entries,
            self.next_sstable_id
        )?;
        if self.flush_pending {
            f.write_str(" flush_pending")?;
        }
        Ok(())
    }
}

/// The main storage engine
///
/// ## Sequencing
///
/// Every operation takes `&mut self`, so at most one is in flight. A flush
/// triggered by a full memtable is either run inline at the end of `put`
/// (`FlushMode::Inline`) or left pending (`FlushMode::Deferred`); a pending
/// flush always completes before the next operation does any work.
///
/// Use `SharedEngine` to drive one engine from several threads.
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// Write-ahead log for the current memtable generation
    wal: WriteAheadLog,

    /// In-memory table for recent writes
    memtable: MemTable,

    /// Immutable SSTables and the id counter
    storage: SSTableStore,

    /// Presentation layer
    observer: Box<dyn EngineObserver>,

    /// Set when a put filled the memtable and the flush has not run yet
    flush_pending: bool,
}

impl Engine {
    /// Create an engine in its initial state, with no observer
    pub fn new(config: Config) -> Result<Self> {
        Self::with_observer(config, NoopObserver)
    }

    /// Create an engine in its initial state that reports to `observer`
    pub fn with_observer(config: Config, observer: impl EngineObserver + 'static) -> Result<Self> {
        config.validate()?;

        tracing::debug!(
            memtable_max_entries = config.memtable_max_entries,
            flush_mode = ?config.flush_mode,
            "engine created"
        );

        Ok(Self {
            config,
            wal: WriteAheadLog::new(),
            memtable: MemTable::new(),
            storage: SSTableStore::new(),
            observer: Box::new(observer),
            flush_pending: false,
        })
    }

    /// Replace the observer; the new one receives the current state at once
    pub fn set_observer(&mut self, observer: impl EngineObserver + 'static) {
        self.observer = Box::new(observer);
        self.notify_state();
    }

    /// Execute a command
    ///
    /// Routes commands to appropriate handlers. A lookup miss is a normal
    /// `NOT_FOUND` response, not an error.
    pub fn execute(&mut self, command: Command) -> Result<Response> {
        match command {
            Command::Put { key, value } => {
                let payload = match self.put(&key, &value)? {
                    PutOutcome::Applied => None,
                    PutOutcome::Flushed(table) => Some(format!("flushed to {}", table.name())),
                    PutOutcome::FlushScheduled => Some("flush scheduled".to_string()),
                };
                Ok(Response::ok(payload))
            }
            Command::Get { key } => match self.fetch(&key) {
                Ok(value) => Ok(Response::ok(Some(value))),
                Err(EmbedError::KeyNotFound(key)) => Ok(Response::not_found(&key)),
                Err(e) => Err(e),
            },
            Command::Flush => Ok(Response::ok(self.flush().map(|t| t.name()))),
            Command::Compact => {
                let result = self.compact()?;
                Ok(Response::ok(Some(format!(
                    "{} ({} tables merged, {} shadowed entries dropped)",
                    result.table.name(),
                    result.consumed_ids.len(),
                    result.shadowed_entries()
                ))))
            }
            Command::Reset => {
                self.reset();
                Ok(Response::ok(None))
            }
            Command::Stats => Ok(Response::ok(Some(self.stats().to_string()))),
            Command::Dump => Ok(Response::ok(Some(self.snapshot().to_string()))),
        }
    }

    // =========================================================================
    // Write Path
    // =========================================================================

    /// Put a key-value pair
    ///
    /// Steps:
    /// 1. Run any pending flush
    /// 2. Reject empty (after trimming) key or value
    /// 3. Write to WAL
    /// 4. Write to MemTable and report the new state
    /// 5. If the MemTable is full, flush (inline) or schedule the flush
    pub fn put(&mut self, key: &str, value: &str) -> Result<PutOutcome> {
        self.settle();

        let (key, value) = match (self.normalize(key), self.normalize(value)) {
            (Some(k), Some(v)) => (k.to_string(), v.to_string()),
            _ => {
                return Err(self.reject(EmbedError::InvalidInput(
                    "Key and Value cannot be empty.".to_string(),
                )))
            }
        };

        // Step 1: Write to WAL first
        let lsn = self.wal.append(&key, &value);

        // Step 2: Write to MemTable
        self.log(
            &format!("Wrote ('{}', '{}') to MemTable.", key, value),
            Severity::Info,
        );
        let entries = self.memtable.put(key, value);
        tracing::trace!(lsn, entries, "put applied");
        self.notify_state();

        // Step 3: Check if flush is needed
        if entries < self.config.memtable_max_entries {
            return Ok(PutOutcome::Applied);
        }

        self.log("MemTable is full! Flushing to SSTable...", Severity::Action);
        self.flush_pending = true;

        match self.config.flush_mode {
            FlushMode::Inline => Ok(self
                .settle()
                .map(PutOutcome::Flushed)
                .unwrap_or(PutOutcome::Applied)),
            FlushMode::Deferred => Ok(PutOutcome::FlushScheduled),
        }
    }

    /// Run the pending flush, if there is one
    ///
    /// Returns the SSTable it produced. Every operation calls this first, so
    /// callers only need it to observe a deferred flush without issuing
    /// another operation.
    pub fn settle(&mut self) -> Option<Arc<SSTable>> {
        if !self.flush_pending {
            return None;
        }
        self.flush_pending = false;

        if self.memtable.is_empty() {
            return None;
        }
        Some(self.flush_internal())
    }

    /// Flush memtable to a new SSTable (public API)
    ///
    /// Forces a flush regardless of memtable size. Returns `None` when there
    /// was nothing to flush.
    pub fn flush(&mut self) -> Option<Arc<SSTable>> {
        if let Some(table) = self.settle() {
            return Some(table);
        }

        if self.memtable.is_empty() {
            self.log("MemTable is empty; nothing to flush.", Severity::Info);
            return None;
        }

        Some(self.flush_internal())
    }

    /// Internal flush implementation
    fn flush_internal(&mut self) -> Arc<SSTable> {
        // Step 1: Sorted snapshot of the MemTable becomes the next SSTable
        let table = self
            .storage
            .flush_entries(self.memtable.entries_sorted_by_key());

        // Step 2: MemTable and WAL die together
        self.memtable.clear();
        self.wal.clear();

        self.log(
            &format!("Flushed MemTable to {}.", table.name()),
            Severity::Info,
        );
        self.notify_state();

        table
    }

    // =========================================================================
    // Read Path
    // =========================================================================

    /// Get a value by key
    ///
    /// `Ok(None)` means the key is in no structure.
    pub fn get(&mut self, key: &str) -> Result<Option<String>> {
        Ok(self.search(key)?.map(|hit| hit.value))
    }

    /// Get a value by key, treating absence as `KeyNotFound`
    pub fn fetch(&mut self, key: &str) -> Result<String> {
        // Report the key exactly as it was searched
        let searched = self.normalize(key).unwrap_or(key).to_string();
        self.search(key)?
            .map(|hit| hit.value)
            .ok_or(EmbedError::KeyNotFound(searched))
    }

    /// Search for a key and report which structure answered
    ///
    /// Search order:
    /// 1. MemTable (most recent writes, always wins)
    /// 2. SSTables (newest to oldest; the first hit wins)
    ///
    /// Each structure is announced with `on_search_step` before it is probed
    /// and reported with `on_search_result` after.
    pub fn search(&mut self, key: &str) -> Result<Option<Hit>> {
        self.settle();

        let key = match self.normalize(key) {
            Some(k) => k.to_string(),
            None => {
                return Err(self.reject(EmbedError::InvalidInput(
                    "Key to find cannot be empty.".to_string(),
                )))
            }
        };

        self.log(&format!("Searching for key: '{}'...", key), Severity::Info);

        // Step 1: Check MemTable first (most recent data)
        self.log("Step 1: Checking MemTable...", Severity::Info);
        if let Some(hit) = self.probe(SearchTarget::Memtable, &key, || self.memtable.get(&key)) {
            return Ok(Some(hit));
        }

        // Step 2: Check SSTables (newest to oldest)
        self.log(
            "Step 2: Checking SSTables (newest to oldest)...",
            Severity::Info,
        );
        for table in self.storage.newest_first() {
            if let Some(hit) = self.probe(SearchTarget::SSTable(table.id()), &key, || table.get(&key)) {
                return Ok(Some(hit));
            }
        }

        self.log(
            &format!("Key '{}' not found in any structure.", key),
            Severity::Error,
        );
        Ok(None)
    }

    /// Report one search step and its result
    fn probe<'a>(
        &self,
        target: SearchTarget,
        key: &str,
        lookup: impl FnOnce() -> Option<&'a str>,
    ) -> Option<Hit> {
        self.observer.on_search_step(target, key);
        let found = lookup();
        self.observer.on_search_result(target, key, found);

        let value = found?;
        self.log(
            &format!("Found key '{}' in {}! Value: '{}'", key, target, value),
            Severity::Success,
        );
        Some(Hit {
            source: target,
            value: value.to_string(),
        })
    }

    // =========================================================================
    // Maintenance
    // =========================================================================

    /// Merge every SSTable into one
    ///
    /// Fails with `InsufficientInput` (state unchanged) when fewer than two
    /// SSTables exist.
    pub fn compact(&mut self) -> Result<CompactionResult> {
        self.settle();

        if self.storage.sstable_count() >= MIN_COMPACTION_INPUTS {
            self.log("Starting compaction of all SSTables...", Severity::Action);
        }

        match self.storage.compact() {
            Ok(result) => {
                self.log(
                    &format!("Compaction complete. Created new {}.", result.table.name()),
                    Severity::Info,
                );
                self.notify_state();
                Ok(result)
            }
            Err(e) => Err(self.reject(e)),
        }
    }

    /// Return the engine to its initial state
    ///
    /// Clears MemTable, WAL and SSTables and rewinds the id and LSN counters.
    pub fn reset(&mut self) {
        self.settle();

        self.memtable.clear();
        self.wal.reset();
        self.storage.reset();

        tracing::info!("engine reset");
        self.log("Engine reset.", Severity::Info);
        self.notify_state();
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Full state snapshot, as observers receive it
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            wal: self.wal.records().to_vec(),
            memtable: self.memtable.entries_sorted_by_key(),
            sstables: self.storage.all().to_vec(),
        }
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            memtable_entries: self.memtable.size(),
            memtable_bytes: self.memtable.byte_size(),
            wal_records: self.wal.len(),
            sstable_count: self.storage.sstable_count(),
            sstable_entries: self.storage.total_entries(),
            next_sstable_id: self.storage.next_id(),
            flush_pending: self.flush_pending,
        }
    }

    pub fn memtable(&self) -> &MemTable {
        &self.memtable
    }

    pub fn wal(&self) -> &WriteAheadLog {
        &self.wal
    }

    pub fn storage(&self) -> &SSTableStore {
        &self.storage
    }

    /// Get the number of SSTables
    pub fn sstable_count(&self) -> usize {
        self.storage.sstable_count()
    }

    /// Whether a deferred flush is waiting to run
    pub fn flush_pending(&self) -> bool {
        self.flush_pending
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Apply the write-boundary rules; `None` means empty after trimming
    fn normalize<'a>(&self, input: &'a str) -> Option<&'a str> {
        if input.trim().is_empty() {
            return None;
        }
        Some(if self.config.trim_input {
            input.trim()
        } else {
            input
        })
    }

    /// Report an error to the observer and hand it back for returning
    fn reject(&self, error: EmbedError) -> EmbedError {
        tracing::warn!(%error, "operation rejected");
        let message = match &error {
            EmbedError::InsufficientInput { required, .. } => {
                format!("Need at least {} SSTables to compact.", required)
            }
            EmbedError::InvalidInput(msg) => format!("Error: {}", msg),
            other => format!("Error: {}", other),
        };
        self.log(&message, Severity::Error);
        error
    }

    fn log(&self, message: &str, severity: Severity) {
        self.observer.on_log(message, severity);
    }

    fn notify_state(&self) {
        self.observer.on_state_changed(&self.snapshot());
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("stats", &self.stats())
            .finish()
    }
}
