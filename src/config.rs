//! Configuration for EmbedKV
//!
//! Centralized configuration with sensible defaults.

use crate::error::{EmbedError, Result};

/// Default memtable capacity, in entries
pub const DEFAULT_MEMTABLE_MAX_ENTRIES: usize = 5;

/// Main configuration for an EmbedKV engine
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // MemTable Configuration
    // -------------------------------------------------------------------------
    /// Number of entries the memtable holds before a flush is triggered
    pub memtable_max_entries: usize,

    /// When a threshold-triggered flush runs relative to the put
    pub flush_mode: FlushMode,

    // -------------------------------------------------------------------------
    // Write Boundary Configuration
    // -------------------------------------------------------------------------
    /// Trim surrounding whitespace from keys and values before validating
    pub trim_input: bool,
}

/// Flush scheduling strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushMode {
    /// Flush inside the same `put` call, after the "full" state was reported
    Inline,

    /// Leave the flush pending; it runs before the next operation starts
    /// (or on `Engine::settle`)
    Deferred,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            memtable_max_entries: DEFAULT_MEMTABLE_MAX_ENTRIES,
            flush_mode: FlushMode::Inline,
            trim_input: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the configuration for values the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.memtable_max_entries == 0 {
            return Err(EmbedError::Config(
                "memtable_max_entries must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the memtable capacity (in entries)
    pub fn memtable_max_entries(mut self, count: usize) -> Self {
        self.config.memtable_max_entries = count;
        self
    }

    /// Set the flush scheduling strategy
    pub fn flush_mode(mut self, mode: FlushMode) -> Self {
        self.config.flush_mode = mode;
        self
    }

    /// Enable or disable whitespace trimming at the write boundary
    pub fn trim_input(mut self, trim: bool) -> Self {
        self.config.trim_input = trim;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
