//! Protocol codec
//!
//! Parsing of command lines and formatting of responses.

use crate::error::{EmbedError, Result};

use super::{Command, Response};

/// Parse one command line
///
/// Leading and trailing whitespace is ignored. For `PUT`, everything after
/// the key is the value, so values may contain spaces.
pub fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim();
    if line.is_empty() {
        return Err(EmbedError::Protocol("Empty command".to_string()));
    }

    let (verb, rest) = split_word(line);
    let verb = verb.to_ascii_uppercase();

    match verb.as_str() {
        "PUT" | "SET" => {
            let (key, value) = split_word(rest);
            if key.is_empty() || value.is_empty() {
                return Err(EmbedError::Protocol(
                    "Usage: PUT <key> <value>".to_string(),
                ));
            }
            Ok(Command::Put {
                key: key.to_string(),
                value: value.to_string(),
            })
        }
        "GET" => {
            let (key, extra) = split_word(rest);
            if key.is_empty() || !extra.is_empty() {
                return Err(EmbedError::Protocol("Usage: GET <key>".to_string()));
            }
            Ok(Command::Get {
                key: key.to_string(),
            })
        }
        "FLUSH" => no_args(Command::Flush, rest),
        "COMPACT" => no_args(Command::Compact, rest),
        "RESET" => no_args(Command::Reset, rest),
        "STATS" => no_args(Command::Stats, rest),
        "DUMP" => no_args(Command::Dump, rest),
        _ => Err(EmbedError::Protocol(format!("Unknown command: {}", verb))),
    }
}

/// Render a response as a single line
pub fn format_response(response: &Response) -> String {
    match &response.payload {
        Some(payload) => format!("{} {}", response.status.as_str(), payload),
        None => response.status.as_str().to_string(),
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Split off the first whitespace-delimited word; the rest is trimmed
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(idx) => (&s[..idx], s[idx..].trim()),
        None => (s, ""),
    }
}

fn no_args(command: Command, rest: &str) -> Result<Command> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(EmbedError::Protocol(format!(
            "{} takes no arguments",
            command.command_type().verb()
        )))
    }
}
