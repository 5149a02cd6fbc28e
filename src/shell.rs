//! REPL loop
//!
//! Reads one line at a time, dispatches it through the command registry and
//! reprints the cursor. Navigation and `os` run inline; every filesystem and
//! stream operation is spawned and the loop moves on without waiting, so
//! completion messages may trail the next prompt or arrive out of order.
//!
//! ## Architecture
//!
//! ```text
//! stdin ──▶ Shell::run_until ──▶ Shell::dispatch ──▶ inline handler
//!                                      │
//!                                      └──spawn──▶ JoinSet ──▶ Output
//! ```
//!
//! All tasks run on the runtime the shell was started on. The binary uses a
//! current-thread runtime, so the cursor is owned by exactly one execution
//! context and output is serialized through [`Output`].

use std::future::Future;
use std::path::PathBuf;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinSet;
use tracing::Instrument;

use crate::commands::{fs, os, Command, CommandKind};
use crate::config::Config;
use crate::error::INVALID_INPUT;
use crate::output::{messages, Output};
use crate::platform::SystemInfoOps;
use crate::session::{self, Session};
use crate::state::{CloseReason, ShellState};

/// Whether the loop should keep reading after a dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Interactive file manager shell
pub struct Shell {
    config: Config,
    session: Session,
    output: Output,
    system: Box<dyn SystemInfoOps>,
    state: ShellState,
    /// In-flight filesystem and stream operations
    tasks: JoinSet<()>,
}

impl Shell {
    pub fn new(
        config: Config,
        session: Session,
        output: Output,
        system: Box<dyn SystemInfoOps>,
    ) -> Self {
        Self {
            config,
            session,
            output,
            system,
            state: ShellState::default(),
            tasks: JoinSet::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> ShellState {
        self.state
    }

    /// Number of spawned operations that have not been reaped yet
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Welcome banner, starting location and first prompt
    pub fn greet(&self) {
        self.output
            .line(messages::welcome(self.session.display_name()));
        self.print_location();
        self.output.prompt(self.config.prompt.as_str());
    }

    /// Parse and dispatch one input line.
    ///
    /// Returns once the handler has been issued, not once it has completed.
    /// Unless the line was `.exit`, the cursor line and prompt are queued
    /// before returning.
    pub async fn dispatch(&mut self, line: &str) -> Flow {
        self.reap();
        if !self.state.begin_dispatch() {
            warn!("Ignoring line while {:?}", self.state);
            return Flow::Exit;
        }

        let span = info_span!("command", line = %line.trim());
        let flow = self.execute(line).instrument(span).await;

        if flow == Flow::Continue {
            self.state.finish_dispatch();
            self.print_location();
            self.output.prompt(self.config.prompt.as_str());
        }
        flow
    }

    /// Wait for every in-flight operation to finish
    pub async fn settle(&mut self) {
        while let Some(joined) = self.tasks.join_next().await {
            log_join_error(joined);
        }
    }

    /// Run until end-of-input or `.exit`
    pub async fn run<R>(self, input: R) -> CloseReason
    where
        R: AsyncBufRead + Unpin,
    {
        self.run_until(input, std::future::pending()).await
    }

    /// Run until end-of-input, `.exit`, or `shutdown` resolves.
    ///
    /// On `.exit` and end-of-input, in-flight operations are allowed to
    /// finish before the farewell; on shutdown they are aborted.
    pub async fn run_until<R, S>(mut self, input: R, shutdown: S) -> CloseReason
    where
        R: AsyncBufRead + Unpin,
        S: Future<Output = ()>,
    {
        self.greet();
        let mut lines = input.lines();
        tokio::pin!(shutdown);

        let reason = loop {
            let next = tokio::select! {
                line = lines.next_line() => line,
                _ = &mut shutdown => break CloseReason::Interrupted,
            };

            match next {
                Ok(Some(line)) => {
                    if self.dispatch(&line).await == Flow::Exit {
                        break CloseReason::ExitCommand;
                    }
                }
                Ok(None) => break CloseReason::EndOfInput,
                Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                    debug!("Undecodable input line: {}", e);
                    self.output.line(INVALID_INPUT);
                    self.print_location();
                    self.output.prompt(self.config.prompt.as_str());
                }
                Err(e) => {
                    warn!("Failed to read input: {}", e);
                    break CloseReason::EndOfInput;
                }
            }
        };

        self.close(reason).await;
        reason
    }

    async fn close(&mut self, reason: CloseReason) {
        self.state.close();
        info!("Closing session: {}", reason);

        if reason == CloseReason::Interrupted {
            self.tasks.abort_all();
        }
        self.settle().await;

        self.output
            .line(messages::farewell(self.session.display_name()));
    }

    async fn execute(&mut self, line: &str) -> Flow {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(e) => {
                self.output.error(&e);
                return Flow::Continue;
            }
        };
        let chunk_size = self.config.chunk_size;

        match command.kind {
            CommandKind::Up => {
                if let Some(dir) = self.session.up() {
                    self.output.line(messages::location(dir));
                }
            }
            CommandKind::Cd => match self.session.change_directory(command.arg(0)).await {
                Ok(dir) => self.output.line(messages::location(dir)),
                Err(e) => self.output.error(&e),
            },
            CommandKind::Ls => {
                let dir = self.session.current_dir().to_path_buf();
                self.spawn(move |output| async move {
                    let listing = session::list(&dir).await;
                    output.report(listing.map(|entries| Some(session::render_listing(&entries))));
                });
            }
            CommandKind::Cat => {
                let path = self.session.resolve(command.arg(0));
                self.spawn(move |output| async move {
                    let result = fs::read_file(&path, output.writer(), chunk_size).await;
                    // Trailing newline after the streamed content
                    output.report(result.map(|_| Some(String::new())));
                });
            }
            CommandKind::Add => {
                let path = self.session.resolve(command.arg(0));
                self.spawn(move |output| async move {
                    output.report(fs::add_file(&path).await.map(|_| None));
                });
            }
            CommandKind::Rn => {
                let (from, to) = self.resolve_pair(&command);
                self.spawn(move |output| async move {
                    output.report(fs::rename(&from, &to).await.map(|_| None));
                });
            }
            CommandKind::Cp => {
                let (source, dest_dir) = self.resolve_pair(&command);
                self.spawn(move |output| async move {
                    let result = fs::copy_file(&source, &dest_dir, chunk_size).await;
                    output.report(result.map(|_| Some(messages::FILE_COPIED.to_string())));
                });
            }
            CommandKind::Mv => {
                let (source, dest_dir) = self.resolve_pair(&command);
                self.spawn(move |output| async move {
                    let result = fs::move_file(&source, &dest_dir, chunk_size, &output).await;
                    output.report(result.map(|_| None));
                });
            }
            CommandKind::Rm => {
                let path = self.session.resolve(command.arg(0));
                self.spawn(move |output| async move {
                    output.report(fs::delete_file(&path).await.map(|_| None));
                });
            }
            CommandKind::Os => match os::os_info(command.arg(0), self.system.as_ref()) {
                Ok(lines) => lines.into_iter().for_each(|l| self.output.line(l)),
                Err(e) => self.output.error(&e),
            },
            CommandKind::Hash => {
                let path = self.session.resolve(command.arg(0));
                self.spawn(move |output| async move {
                    output.report(fs::hash_file(&path, chunk_size).await.map(Some));
                });
            }
            CommandKind::Compress => {
                let (source, destination) = self.resolve_pair(&command);
                self.spawn(move |output| async move {
                    let result = fs::compress_file(&source, &destination, chunk_size).await;
                    output.report(result.map(|_| Some(messages::FILE_COMPRESSED.to_string())));
                });
            }
            CommandKind::Decompress => {
                let (source, destination) = self.resolve_pair(&command);
                self.spawn(move |output| async move {
                    let result = fs::decompress_file(&source, &destination, chunk_size).await;
                    output.report(result.map(|_| Some(messages::FILE_DECOMPRESSED.to_string())));
                });
            }
            CommandKind::Exit => return Flow::Exit,
        }

        Flow::Continue
    }

    /// Issue an operation without waiting for it
    fn spawn<F, Fut>(&mut self, make_task: F)
    where
        F: FnOnce(Output) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let task = make_task(self.output.clone());
        self.tasks.spawn(task.in_current_span());
    }

    fn resolve_pair(&self, command: &Command) -> (PathBuf, PathBuf) {
        (
            self.session.resolve(command.arg(0)),
            self.session.resolve(command.arg(1)),
        )
    }

    fn print_location(&self) {
        self.output
            .line(messages::location(self.session.current_dir()));
    }

    /// Drop bookkeeping for operations that already finished
    fn reap(&mut self) {
        while let Some(joined) = self.tasks.try_join_next() {
            log_join_error(joined);
        }
    }
}

fn log_join_error(joined: std::result::Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        if e.is_panic() {
            error!("Operation panicked: {}", e);
        } else {
            debug!("Operation cancelled: {}", e);
        }
    }
}
