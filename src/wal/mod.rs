//! Write-Ahead Log (WAL) Module
//!
//! Makes the two-step write path (log, then apply) explicit and observable.
//!
//! ## Responsibilities
//! - Append a record before every memtable mutation
//! - Log Sequence Numbers (LSN) for ordering
//! - Live exactly as long as one memtable generation
//!
//! The log is in-memory only. It is cleared on every flush and never
//! replayed, so it carries no durability guarantee.
//!
//! ## Layout
//! ```text
//! ┌──────────────────────────────┐
//! │ LSN 7  PUT(a, 1)             │  <- oldest in this generation
//! │ LSN 8  PUT(b, 2)             │
//! │ LSN 9  PUT(a, 3)             │  <- newest
//! └──────────────────────────────┘
//!   cleared on flush, LSN keeps counting
//! ```

mod log;
mod record;

pub use log::WriteAheadLog;
pub use record::WalRecord;
