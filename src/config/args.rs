//! Startup argument scanning
//!
//! Arguments are scanned rather than strictly parsed: recognised tokens are
//! applied and anything else is collected so it can be reported once
//! logging is up.

use super::{Config, MAX_CHUNK_SIZE, MIN_CHUNK_SIZE};

/// Startup argument errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid chunk size: {0} (must be a number of bytes)")]
    InvalidChunkSize(String),

    #[error(
        "Chunk size out of range: {0} (must be between {min} and {max})",
        min = MIN_CHUNK_SIZE,
        max = MAX_CHUNK_SIZE
    )]
    ChunkSizeOutOfRange(usize),
}

/// What the process was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Start an interactive session
    Run(Config),
    /// Print usage and exit
    Help,
    /// Print the version and exit
    Version,
}

/// Scanned startup arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppArgs {
    /// What to do
    pub invocation: Invocation,
    /// Tokens that were not recognised, in order
    pub ignored: Vec<String>,
}

impl AppArgs {
    /// Scan arguments (without the program name)
    pub fn parse<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Config::default();
        let mut ignored = Vec::new();

        for arg in args {
            let arg = arg.as_ref();
            if let Some(name) = arg.strip_prefix("--username=") {
                if !name.is_empty() {
                    config.username = name.to_string();
                }
            } else if let Some(size) = arg.strip_prefix("--chunk-size=") {
                config.chunk_size = parse_chunk_size(size)?;
            } else {
                match arg {
                    "--debug" | "-d" => config.debug = true,
                    "--help" | "-?" => return Ok(Self::exit_early(Invocation::Help, ignored)),
                    "--version" | "-v" => {
                        return Ok(Self::exit_early(Invocation::Version, ignored))
                    }
                    other => ignored.push(other.to_string()),
                }
            }
        }

        Ok(Self {
            invocation: Invocation::Run(config),
            ignored,
        })
    }

    fn exit_early(invocation: Invocation, ignored: Vec<String>) -> Self {
        Self {
            invocation,
            ignored,
        }
    }

    /// Warn about ignored tokens; call once logging is initialised
    pub fn log_ignored(&self) {
        for arg in &self.ignored {
            warn!("Ignoring unrecognised argument: {}", arg);
        }
    }
}

fn parse_chunk_size(value: &str) -> Result<usize, ConfigError> {
    let size: usize = value
        .parse()
        .map_err(|_| ConfigError::InvalidChunkSize(value.to_string()))?;
    if !(MIN_CHUNK_SIZE..=MAX_CHUNK_SIZE).contains(&size) {
        return Err(ConfigError::ChunkSizeOutOfRange(size));
    }
    Ok(size)
}
