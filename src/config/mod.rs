//! Configuration for fmshell
//!
//! There is no configuration file: everything comes from startup arguments
//! (see [`args`]) and a couple of environment variables. The effective
//! configuration is fixed for the lifetime of the session.

pub mod args;

use serde::{Deserialize, Serialize};

use crate::pipeline::DEFAULT_CHUNK_SIZE;

pub use args::{AppArgs, Invocation};

/// Display name used when `--username` is absent
pub const DEFAULT_USERNAME: &str = "No Name";

/// Prompt printed before each input line
pub const DEFAULT_PROMPT: &str = "> ";

/// Environment variable that enables debug logging
pub const DEBUG_ENV: &str = "FMSHELL_DEBUG";

/// Smallest accepted transfer chunk
pub const MIN_CHUNK_SIZE: usize = 512;

/// Largest accepted transfer chunk (16 MiB)
pub const MAX_CHUNK_SIZE: usize = 16 * 1024 * 1024;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Name shown in the welcome and farewell messages
    pub username: String,

    /// Enable debug logging
    pub debug: bool,

    /// Prompt text
    pub prompt: String,

    /// Read/write chunk size for stream operations, in bytes
    pub chunk_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            debug: false,
            prompt: DEFAULT_PROMPT.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl Config {
    /// Apply environment overrides through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(DEBUG_ENV) {
            if value == "1" || value.eq_ignore_ascii_case("true") {
                self.debug = true;
            }
        }
    }

    /// Log filter used when `RUST_LOG` is not set
    pub fn default_log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "warn"
        }
    }
}
