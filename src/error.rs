//! Error types and Result aliases for fmshell
//!
//! Errors are structured internally so handlers and tests can tell them
//! apart, but every one of them renders to one of two fixed user-facing
//! strings: [`OPERATION_FAILED`] or [`INVALID_INPUT`].

use std::fmt;
use std::path::PathBuf;

/// Result type alias for fmshell operations
pub type Result<T> = std::result::Result<T, Error>;

/// Uniform message for every filesystem, stream and resolution failure
pub const OPERATION_FAILED: &str = "Operation failed";

/// Uniform message for protocol errors (unknown command or OS flag)
pub const INVALID_INPUT: &str = "Invalid input";

/// Error taxonomy, by source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Target does not exist or is the wrong kind of entry
    Resolution,
    /// Permission, device or pipe failures
    Io,
    /// Malformed compressed input
    Format,
    /// Unknown command token or OS sub-flag
    Protocol,
}

/// Main error type for fmshell
#[derive(Debug)]
pub enum Error {
    // === Resolution errors ===
    /// Path does not exist
    NotFound { path: PathBuf },

    /// Path exists but is not a directory
    NotADirectory { path: PathBuf },

    /// Path is a directory where a file was expected
    IsADirectory { path: PathBuf },

    /// Path has no final component to copy under another directory
    NoFileName { path: PathBuf },

    /// Source and destination resolve to the same file
    SameFile { path: PathBuf },

    // === Stream errors ===
    /// A transform stage rejected its input
    MalformedInput { path: PathBuf, reason: String },

    // === Protocol errors ===
    /// First token did not match any registered command
    UnknownCommand { command: String },

    /// `os` received a flag outside the supported set
    UnknownOsFlag { flag: String },

    // === I/O errors ===
    /// I/O errors
    Io(std::io::Error),
}

impl Error {
    /// Classify the error by where it came from
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound { .. }
            | Error::NotADirectory { .. }
            | Error::IsADirectory { .. }
            | Error::NoFileName { .. }
            | Error::SameFile { .. } => ErrorKind::Resolution,
            Error::MalformedInput { .. } => ErrorKind::Format,
            Error::UnknownCommand { .. } | Error::UnknownOsFlag { .. } => ErrorKind::Protocol,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    /// The string shown to the user; causes are never distinguished
    pub fn user_message(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Protocol => INVALID_INPUT,
            _ => OPERATION_FAILED,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound { path } => write!(f, "'{}' does not exist", path.display()),
            Error::NotADirectory { path } => {
                write!(f, "'{}' is not a directory", path.display())
            }
            Error::IsADirectory { path } => write!(f, "'{}' is a directory", path.display()),
            Error::NoFileName { path } => {
                write!(f, "'{}' has no file name component", path.display())
            }
            Error::SameFile { path } => {
                write!(f, "source and destination are both '{}'", path.display())
            }
            Error::MalformedInput { path, reason } => {
                write!(f, "Malformed input in '{}': {}", path.display(), reason)
            }
            Error::UnknownCommand { command } => write!(f, "Unknown command: '{}'", command),
            Error::UnknownOsFlag { flag } => write!(f, "Unknown os flag: '{}'", flag),
            Error::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
