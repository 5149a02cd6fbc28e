//! fmshell - An interactive line-oriented file manager shell
//!
//! This library provides the core functionality for fmshell, a REPL that
//! keeps its own virtual working directory and exposes a small set of
//! filesystem, stream and system-information commands.
//!
//! ## Features
//!
//! - **Virtual cursor:** Navigation never changes the process working directory
//! - **Streaming I/O:** `cat`, `cp`, `mv`, `hash` and the codecs never load whole files
//! - **Brotli:** `compress` / `decompress` through a chunked stream pipeline
//! - **Fire-and-forget:** File operations run concurrently with the prompt
//! - **Uniform errors:** Users only ever see `Operation failed` or `Invalid input`
//!
//! ## Module Organization
//!
//! ### Core Functionality
//!
//! - [`shell`] - REPL loop, dispatch and session close
//! - [`session`] - Cursor, navigation and directory listings
//! - [`commands`] - Command registry, parsing and handlers
//! - [`pipeline`] - Source → stages → sink stream composition
//! - [`output`] - Single-writer output channel and fixed messages
//!
//! ### Utilities
//!
//! - [`path`] - Lexical path resolution against the cursor
//! - [`table`] - Boxed table rendering for `ls`
//! - [`platform`] - OS information providers
//! - [`config`] - Startup arguments and environment overrides
//! - [`state`] - REPL lifecycle state
//! - [`mod@error`] - Error types and Result aliases
//!
//! ## Quick Start
//!
//! ```no_run
//! use fmshell::{Config, Output, Platform, Session, Shell};
//!
//! # async fn run() -> fmshell::Result<()> {
//! let config = Config::default();
//! let session = Session::at_home(config.username.clone(), dirs::home_dir())?;
//! let (output, rx) = Output::channel();
//! let printer = tokio::spawn(fmshell::output::run_printer(rx, tokio::io::stdout()));
//!
//! let shell = Shell::new(config, session, output, Platform::system());
//! shell.run(tokio::io::BufReader::new(tokio::io::stdin())).await;
//! let _ = printer.await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! fmshell runs on a single-threaded tokio runtime:
//!
//! - **REPL loop:** Reads lines, resolves paths and issues handlers
//! - **Spawned operations:** Stream and filesystem work, one task per command
//! - **Printer task:** Sole writer to stdout, fed through an mpsc channel

#![allow(unexpected_cfgs)]

#[macro_use]
extern crate tracing;

pub mod config;
pub mod error;
pub mod state;

// Core modules
pub mod commands;
pub mod output;
pub mod pipeline;
pub mod session;
pub mod shell;

// Utility modules
pub mod path;
pub mod platform;
pub mod table;

// Re-exports for core functionality
pub use config::Config;
pub use error::{Error, Result};
pub use output::Output;
pub use platform::Platform;
pub use session::Session;
pub use shell::Shell;
pub use state::{CloseReason, ShellState};

// Version information
/// The current version of fmshell from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The application name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// The application description from Cargo.toml
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
