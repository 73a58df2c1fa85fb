//! Error types for EmbedKV
//!
//! Provides a unified error type for all operations.
//!
//! Every error here is locally recoverable: a failed operation leaves the
//! engine in the state it had before the call.

use thiserror::Error;

/// Result type alias using EmbedError
pub type Result<T> = std::result::Result<T, EmbedError>;

/// Unified error type for EmbedKV operations
#[derive(Debug, Error)]
pub enum EmbedError {
    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Insufficient input: need at least {required} SSTables to compact, found {found}")]
    InsufficientInput { required: usize, found: usize },

    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    // -------------------------------------------------------------------------
    // Command Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Value Encoding Errors
    // -------------------------------------------------------------------------
    #[error("Decode error: {0}")]
    Decode(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // I/O Errors (shell and bench front-ends)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
