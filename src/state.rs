//! Shell state machine
//!
//! ```text
//!  AwaitingLine ──line──▶ Dispatching ──handler returns──▶ AwaitingLine
//!       │                      │
//!       └──EOF / Ctrl+C──▶ Closed ◀──.exit──┘
//! ```

use std::fmt;

/// REPL lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShellState {
    /// Waiting for the next input line
    #[default]
    AwaitingLine,
    /// A line is being parsed and its handler issued
    Dispatching,
    /// Input closed; no further lines are accepted
    Closed,
}

/// Why the session closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// `.exit` command
    ExitCommand,
    /// Input stream ended
    EndOfInput,
    /// Ctrl+C
    Interrupted,
}

impl ShellState {
    /// Begin dispatching a line; only valid while awaiting one
    pub fn begin_dispatch(&mut self) -> bool {
        if *self == ShellState::AwaitingLine {
            *self = ShellState::Dispatching;
            true
        } else {
            false
        }
    }

    /// Handler returned control to the loop
    pub fn finish_dispatch(&mut self) {
        if *self == ShellState::Dispatching {
            *self = ShellState::AwaitingLine;
        }
    }

    pub fn close(&mut self) {
        *self = ShellState::Closed;
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, ShellState::Closed)
    }
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            CloseReason::ExitCommand => ".exit",
            CloseReason::EndOfInput => "end of input",
            CloseReason::Interrupted => "interrupt",
        };
        f.write_str(text)
    }
}
