//! Storage Module
//!
//! Immutable, key-sorted segments (SSTables) and the store that orders them.
//!
//! ## Responsibilities
//! - Turn a memtable snapshot into a new SSTable (flush)
//! - Keep SSTables ordered oldest → newest, with strictly increasing ids
//! - Point lookups across tables, newest first
//! - Merge-all compaction with last-writer-wins by recency
//!
//! ## Store Layout
//! ```text
//!   oldest                                   newest
//! ┌──────────┐   ┌──────────┐   ┌──────────┐
//! │SSTable-0 │ → │SSTable-1 │ → │SSTable-2 │      reads walk right → left
//! └──────────┘   └──────────┘   └──────────┘
//!        \            |             /
//!         └──── compact() ─────────┘
//!                     ▼
//!               ┌──────────┐
//!               │SSTable-3 │   sole survivor, fresh id
//!               └──────────┘
//! ```

mod compaction;
mod sstable;
mod store;

pub use compaction::{merge_tables, CompactionResult, MIN_COMPACTION_INPUTS};
pub use sstable::SSTable;
pub use store::SSTableStore;
