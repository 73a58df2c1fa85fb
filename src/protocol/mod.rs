//! Protocol Module
//!
//! Line-oriented command language for driving an engine interactively.
//!
//! ## Request Format
//! One command per line, verb first, case-insensitive:
//! ```text
//! PUT <key> <value...>     value is the rest of the line
//! GET <key>
//! FLUSH
//! COMPACT
//! RESET
//! STATS
//! DUMP
//! ```
//!
//! ## Response Format
//! ```text
//! OK [payload]
//! NOT_FOUND [payload]
//! ERROR <message>
//! ```
//!
//! Blank lines and lines starting with `#` are skipped; `quit` or `exit`
//! ends a session.

mod codec;
mod command;
mod response;
mod session;

pub use codec::{format_response, parse_command};
pub use command::{Command, CommandType};
pub use response::{Response, Status};
pub use session::{handle_line, run_script, LineOutcome};
