//! Stream pipelines
//!
//! A pipeline reads from one source, pushes the bytes through zero or more
//! transform stages and writes them to one sink. Data moves in fixed-size
//! chunks so files of any size stream without being loaded into memory.
//!
//! ```text
//! source ──▶ [tap] ───▶ stage 1 ──▶ … ──▶ stage n ──▶ sink
//! ```
//!
//! The tap records whether the raw source failed, which is how a decoder
//! rejecting its input ([`ErrorKind::Format`](crate::error::ErrorKind)) is
//! told apart from an I/O error on the underlying file.

use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use async_compression::tokio::bufread::{BrotliDecoder, BrotliEncoder};
use sha2::{Digest, Sha256};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader, ReadBuf};

use crate::error::{Error, Result};

/// Default chunk size for reads and writes (64 KiB)
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

type BoxedRead<'a> = Box<dyn AsyncRead + Unpin + Send + 'a>;

/// A transform applied between source and sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Pass bytes through unchanged
    Identity,
    /// Brotli-compress
    Compress,
    /// Brotli-decompress
    Decompress,
}

/// Terminal outcome of a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineOutcome {
    Success,
    Failure,
}

impl<T> From<&Result<T>> for PipelineOutcome {
    fn from(result: &Result<T>) -> Self {
        match result {
            Ok(_) => PipelineOutcome::Success,
            Err(_) => PipelineOutcome::Failure,
        }
    }
}

/// Composition of transform stages with a chunk size
#[derive(Debug, Clone)]
pub struct StreamPipeline {
    stages: Vec<Stage>,
    chunk_size: usize,
    label: PathBuf,
}

impl StreamPipeline {
    /// Create an empty pipeline (identity transfer)
    pub fn new() -> Self {
        Self {
            stages: Vec::new(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            label: PathBuf::new(),
        }
    }

    /// Append a transform stage
    pub fn stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    /// Set the transfer chunk size; zero falls back to the default
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = if chunk_size == 0 {
            DEFAULT_CHUNK_SIZE
        } else {
            chunk_size
        };
        self
    }

    /// Path named in format errors
    pub fn label(mut self, path: impl AsRef<Path>) -> Self {
        self.label = path.as_ref().to_path_buf();
        self
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Run the pipeline to completion, returning bytes written to the sink.
    ///
    /// Succeeds only after the sink has been flushed and shut down; any stage
    /// error ends the run with exactly one `Err`.
    pub async fn run<R, W>(&self, source: R, mut sink: W) -> Result<u64>
    where
        R: AsyncRead + Unpin + Send,
        W: AsyncWrite + Unpin,
    {
        let source_failed = Arc::new(AtomicBool::new(false));
        let tap = SourceTap {
            inner: source,
            failed: Arc::clone(&source_failed),
        };
        let mut reader = self.assemble(tap);
        let mut buf = vec![0u8; self.chunk_size];
        let mut written = 0u64;

        loop {
            let n = match reader.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => n,
                Err(err) => return Err(self.classify_read_error(err, &source_failed)),
            };
            sink.write_all(&buf[..n]).await?;
            written += n as u64;
        }

        sink.flush().await?;
        sink.shutdown().await?;
        trace!("Pipeline {:?} wrote {} bytes", self.stages, written);
        Ok(written)
    }

    fn assemble<'a, R>(&self, source: R) -> BoxedRead<'a>
    where
        R: AsyncRead + Unpin + Send + 'a,
    {
        let mut reader: BoxedRead<'a> = Box::new(source);
        for stage in &self.stages {
            reader = match stage {
                Stage::Identity => reader,
                Stage::Compress => Box::new(BrotliEncoder::new(BufReader::with_capacity(
                    self.chunk_size,
                    reader,
                ))),
                Stage::Decompress => Box::new(BrotliDecoder::new(BufReader::with_capacity(
                    self.chunk_size,
                    reader,
                ))),
            };
        }
        reader
    }

    fn classify_read_error(&self, err: io::Error, source_failed: &AtomicBool) -> Error {
        let decoding = self.stages.contains(&Stage::Decompress);
        if decoding && !source_failed.load(Ordering::Relaxed) {
            Error::MalformedInput {
                path: self.label.clone(),
                reason: err.to_string(),
            }
        } else {
            Error::Io(err)
        }
    }
}

impl Default for StreamPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Records whether the wrapped source itself returned an error
struct SourceTap<R> {
    inner: R,
    failed: Arc<AtomicBool>,
}

impl<R: AsyncRead + Unpin> AsyncRead for SourceTap<R> {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let poll = Pin::new(&mut self.inner).poll_read(cx, buf);
        if let Poll::Ready(Err(_)) = &poll {
            self.failed.store(true, Ordering::Relaxed);
        }
        poll
    }
}

/// Sink that feeds everything written into a SHA-256 digest
#[derive(Debug, Default)]
pub struct HashSink {
    hasher: Sha256,
}

impl HashSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lowercase hex digest of everything written so far
    pub fn hex_digest(self) -> String {
        hex::encode(self.hasher.finalize())
    }
}

impl AsyncWrite for HashSink {
    fn poll_write(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        self.hasher.update(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}
