//! Line session
//!
//! Turns raw input lines (typed or read from a script) into engine calls.
//! Everything an engine call reports to its observer has been emitted by the
//! time `handle_line` returns, so a consumer that drains observer events
//! after each reply sees exactly that command's events.

use std::io::BufRead;

use crate::engine::Engine;
use crate::error::Result;

use super::{parse_command, Response};

/// What a single input line amounts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Blank line or `#` comment
    Skip,

    /// `quit` or `exit`
    Quit,

    /// A command ran (or failed to parse) and produced this response
    Reply(Response),
}

/// Run one input line against the engine
///
/// Parse and execution errors become `ERROR` responses, so a bad line never
/// ends a session.
pub fn handle_line(engine: &mut Engine, line: &str) -> LineOutcome {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return LineOutcome::Skip;
    }
    if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
        return LineOutcome::Quit;
    }

    let response = match parse_command(line).and_then(|cmd| engine.execute(cmd)) {
        Ok(response) => response,
        Err(e) => Response::error(e.to_string()),
    };
    LineOutcome::Reply(response)
}

/// Run every line of a script, stopping at `quit`/`exit` or end of input
///
/// Returns one response per executed command, in order.
pub fn run_script<R: BufRead>(engine: &mut Engine, input: R) -> Result<Vec<Response>> {
    let mut responses = Vec::new();
    for line in input.lines() {
        match handle_line(engine, &line?) {
            LineOutcome::Skip => {}
            LineOutcome::Quit => break,
            LineOutcome::Reply(response) => responses.push(response),
        }
    }
    Ok(responses)
}
