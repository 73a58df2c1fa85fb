//! # EmbedKV
//!
//! The write and read paths of a log-structured merge key-value store,
//! built to be watched:
//! - Write-Ahead Log (WAL) written before every memtable mutation
//! - Capacity-bounded MemTable flushed into immutable, sorted SSTables
//! - Reads that probe the MemTable, then SSTables newest → oldest
//! - Merge-all compaction with last-writer-wins by recency
//! - An observer interface reporting every state change and search step
//! - A typed tensor layer that stores float tensors as engine values
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │           Shell / SharedEngine / embedding caller            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  Command / put / get / compact / reset
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Engine                                │──► EngineObserver
//! │          (one operation at a time, flush trigger)            │    (snapshots,
//! └─────────────────────┬───────────────────────────────────────┘     search steps,
//!                       │                                              status log)
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │     WAL     │          │  MemTable   │
//!   │  (Append)   │          │ (BTreeMap)  │
//!   └─────────────┘          └──────┬──────┘
//!                                   │ flush when full
//!                                   ▼
//!                           ┌──────────────┐
//!                           │ SSTableStore │
//!                           │ (oldest →    │
//!                           │   newest)    │
//!                           └──────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod wal;
pub mod memtable;
pub mod storage;
pub mod observer;
pub mod protocol;
pub mod engine;
pub mod shared;
pub mod tensor;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{EmbedError, Result};
pub use config::{Config, FlushMode};
pub use engine::{Engine, EngineStats, Hit, PutOutcome};
pub use shared::SharedEngine;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of EmbedKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
