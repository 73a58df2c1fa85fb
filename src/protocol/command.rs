//! Command definitions
//!
//! Represents commands entered by a user or script.

use std::fmt;

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Put,
    Get,
    Flush,
    Compact,
    Reset,
    Stats,
    Dump,
}

impl CommandType {
    /// The verb that introduces this command on a line
    pub fn verb(&self) -> &'static str {
        match self {
            CommandType::Put => "PUT",
            CommandType::Get => "GET",
            CommandType::Flush => "FLUSH",
            CommandType::Compact => "COMPACT",
            CommandType::Reset => "RESET",
            CommandType::Stats => "STATS",
            CommandType::Dump => "DUMP",
        }
    }

    /// Whether executing the command can change engine state
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            CommandType::Put | CommandType::Flush | CommandType::Compact | CommandType::Reset
        )
    }
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Put a key-value pair
    Put { key: String, value: String },

    /// Get a value by key
    Get { key: String },

    /// Force a memtable flush
    Flush,

    /// Merge all SSTables into one
    Compact,

    /// Return the engine to its initial state
    Reset,

    /// Report engine statistics
    Stats,

    /// Report the full state snapshot
    Dump,
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Put { .. } => CommandType::Put,
            Command::Get { .. } => CommandType::Get,
            Command::Flush => CommandType::Flush,
            Command::Compact => CommandType::Compact,
            Command::Reset => CommandType::Reset,
            Command::Stats => CommandType::Stats,
            Command::Dump => CommandType::Dump,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Put { key, value } => write!(f, "PUT {} {}", key, value),
            Command::Get { key } => write!(f, "GET {}", key),
            other => f.write_str(other.command_type().verb()),
        }
    }
}
