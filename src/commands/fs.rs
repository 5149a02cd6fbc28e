//! Filesystem command handlers
//!
//! Every handler takes paths that have already been resolved against the
//! cursor. Stream-based handlers (cat, cp, mv, hash, compress, decompress)
//! run through [`StreamPipeline`]; the rest are single filesystem calls.

use std::path::{Path, PathBuf};

use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWrite;

use crate::error::{Error, Result};
use crate::output::{messages, Output};
use crate::pipeline::{HashSink, PipelineOutcome, Stage, StreamPipeline};

/// Open a regular file for streaming.
///
/// Directories are rejected up front so no destination gets created for
/// a source that can never be read.
async fn open_source(path: &Path) -> Result<File> {
    let file = File::open(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Error::Io(e)
        }
    })?;

    if file.metadata().await?.is_dir() {
        return Err(Error::IsADirectory {
            path: path.to_path_buf(),
        });
    }
    Ok(file)
}

/// Open `destination` for writing, refusing any alias of `source`.
///
/// The file is opened without truncation and compared by identity (device
/// and inode, or file index on Windows), so symlinked or hard-linked
/// directories cannot trick a copy into emptying its own source. Only then
/// is it truncated.
async fn open_destination(source: &Path, destination: &Path) -> Result<File> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(destination)
        .await?;

    let (a, b) = (source.to_path_buf(), destination.to_path_buf());
    let same = tokio::task::spawn_blocking(move || same_file::is_same_file(&a, &b))
        .await
        .map_err(|e| Error::Io(std::io::Error::other(e)))??;
    if same {
        return Err(Error::SameFile {
            path: destination.to_path_buf(),
        });
    }

    file.set_len(0).await?;
    Ok(file)
}

/// Stream a file into `sink` without loading it into memory
pub async fn read_file<W>(path: &Path, sink: W, chunk_size: usize) -> Result<u64>
where
    W: AsyncWrite + Unpin,
{
    let source = open_source(path).await?;
    let result = StreamPipeline::new()
        .chunk_size(chunk_size)
        .run(source, sink)
        .await;
    debug!("cat {} -> {:?}", path.display(), PipelineOutcome::from(&result));
    result
}

/// Create an empty file; an existing file is truncated
pub async fn add_file(path: &Path) -> Result<()> {
    File::create(path).await?;
    info!("Created {}", path.display());
    Ok(())
}

pub async fn rename(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).await?;
    info!("Renamed {} -> {}", from.display(), to.display());
    Ok(())
}

/// Copy `source` into `dest_dir`, keeping its file name.
///
/// Returns the path of the new copy.
pub async fn copy_file(source: &Path, dest_dir: &Path, chunk_size: usize) -> Result<PathBuf> {
    let file_name = source.file_name().ok_or_else(|| Error::NoFileName {
        path: source.to_path_buf(),
    })?;
    let destination = dest_dir.join(file_name);

    let reader = open_source(source).await?;
    let writer = open_destination(source, &destination).await?;
    let result = StreamPipeline::new()
        .chunk_size(chunk_size)
        .run(reader, writer)
        .await;
    info!(
        "Copy {} -> {}: {:?}",
        source.display(),
        destination.display(),
        PipelineOutcome::from(&result)
    );

    result.map(|_| destination)
}

/// Copy, then delete the original.
///
/// Not atomic: the copy's success is reported on `output` before the delete
/// runs, so a failed delete shows up as a second, independent failure and
/// leaves both files on disk. A failed copy never attempts the delete.
pub async fn move_file(
    source: &Path,
    dest_dir: &Path,
    chunk_size: usize,
    output: &Output,
) -> Result<()> {
    copy_file(source, dest_dir, chunk_size).await?;
    output.line(messages::FILE_COPIED);

    delete_file(source).await.map_err(|e| {
        warn!(
            "Move of {} left the original in place: {}",
            source.display(),
            e
        );
        e
    })
}

/// Delete a file (directories are not removed)
pub async fn delete_file(path: &Path) -> Result<()> {
    fs::remove_file(path).await?;
    info!("Deleted {}", path.display());
    Ok(())
}

/// SHA-256 of a file's content as lowercase hex
pub async fn hash_file(path: &Path, chunk_size: usize) -> Result<String> {
    let source = open_source(path).await?;
    let mut sink = HashSink::new();
    StreamPipeline::new()
        .chunk_size(chunk_size)
        .run(source, &mut sink)
        .await?;
    Ok(sink.hex_digest())
}

pub async fn compress_file(source: &Path, destination: &Path, chunk_size: usize) -> Result<u64> {
    transcode(source, destination, Stage::Compress, chunk_size).await
}

pub async fn decompress_file(source: &Path, destination: &Path, chunk_size: usize) -> Result<u64> {
    transcode(source, destination, Stage::Decompress, chunk_size).await
}

/// Stream `source` through one codec stage into exactly `destination`
async fn transcode(
    source: &Path,
    destination: &Path,
    stage: Stage,
    chunk_size: usize,
) -> Result<u64> {
    let reader = open_source(source).await?;
    let writer = open_destination(source, destination).await?;
    let result = StreamPipeline::new()
        .stage(stage)
        .chunk_size(chunk_size)
        .label(source)
        .run(reader, writer)
        .await;
    info!(
        "{:?} {} -> {}: {:?}",
        stage,
        source.display(),
        destination.display(),
        PipelineOutcome::from(&result)
    );
    result
}
