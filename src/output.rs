//! Output serialization
//!
//! Every byte the shell prints goes through one unbounded channel and is
//! written by a single printer task, so completion messages from spawned
//! operations never tear a line written by the loop.
//!
//! ```text
//! ┌──────────────┐
//! │  REPL loop   │──┐
//! └──────────────┘  │    OutputEvent     ┌──────────────┐
//! ┌──────────────┐  ├───────────────────▶│ printer task │──▶ stdout
//! │ spawned ops  │──┘                    └──────────────┘
//! └──────────────┘
//! ```

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::error::Error;

/// Fixed user-visible messages
pub mod messages {
    /// Printed by `cp` and by the copy half of `mv`
    pub const FILE_COPIED: &str = "File copied successfully";
    pub const FILE_COMPRESSED: &str = "File compressed successfully";
    pub const FILE_DECOMPRESSED: &str = "File decompressed successfully";

    pub fn welcome(username: &str) -> String {
        format!("Welcome to the File Manager, {}!", username)
    }

    pub fn farewell(username: &str) -> String {
        format!("Thank you for using File Manager, {}, goodbye!", username)
    }

    pub fn location(dir: &std::path::Path) -> String {
        format!("You are currently in {}", dir.display())
    }
}

/// A unit of output, written atomically by the printer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputEvent {
    /// Text followed by a newline
    Line(String),
    /// Raw bytes, written as-is
    Bytes(Vec<u8>),
    /// Prompt text, no trailing newline
    Prompt(String),
}

/// Cloneable handle for queueing output
#[derive(Debug, Clone)]
pub struct Output {
    tx: UnboundedSender<OutputEvent>,
}

impl Output {
    /// Create an output handle and the receiver the printer drains
    pub fn channel() -> (Self, UnboundedReceiver<OutputEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn line(&self, text: impl Into<String>) {
        self.send(OutputEvent::Line(text.into()));
    }

    pub fn bytes(&self, data: Vec<u8>) {
        self.send(OutputEvent::Bytes(data));
    }

    pub fn prompt(&self, text: impl Into<String>) {
        self.send(OutputEvent::Prompt(text.into()));
    }

    /// Report an error with its uniform message, logging the real cause
    pub fn error(&self, err: &Error) {
        debug!("Reporting {:?} error: {}", err.kind(), err);
        self.line(err.user_message());
    }

    /// Report a handler result: the success message if any, or the error
    pub fn report(&self, result: crate::error::Result<Option<String>>) {
        match result {
            Ok(Some(message)) => self.line(message),
            Ok(None) => {}
            Err(err) => self.error(&err),
        }
    }

    /// An `AsyncWrite` sink that forwards everything into this channel
    pub fn writer(&self) -> OutputWriter {
        OutputWriter {
            output: self.clone(),
        }
    }

    fn send(&self, event: OutputEvent) {
        if self.tx.send(event).is_err() {
            // Printer is gone; the session is shutting down.
            trace!("Dropping output event, printer closed");
        }
    }
}

/// Stream sink that turns writes into [`OutputEvent::Bytes`]
#[derive(Debug)]
pub struct OutputWriter {
    output: Output,
}

impl AsyncWrite for OutputWriter {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        if self.output.tx.is_closed() {
            return Poll::Ready(Err(io::Error::from(io::ErrorKind::BrokenPipe)));
        }
        self.output.bytes(buf.to_vec());
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

/// Write events to `out` until every [`Output`] handle has been dropped
pub async fn run_printer<W>(mut rx: UnboundedReceiver<OutputEvent>, mut out: W) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(event) = rx.recv().await {
        match event {
            OutputEvent::Line(text) => {
                out.write_all(text.as_bytes()).await?;
                out.write_all(b"\n").await?;
            }
            OutputEvent::Bytes(data) => out.write_all(&data).await?,
            OutputEvent::Prompt(text) => out.write_all(text.as_bytes()).await?,
        }
        out.flush().await?;
    }

    debug!("Output channel closed, printer exiting");
    out.flush().await
}
