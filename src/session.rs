//! Session and navigation state
//!
//! The session owns the single mutable cursor. The cursor is only ever
//! reassigned after the target has been verified to be an existing
//! directory, so a failed navigation leaves it untouched.

use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::path;
use crate::table;

/// Entry classification for listings.
///
/// Everything that is not a directory (regular files, symlinks, sockets,
/// devices) is reported as `File`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntryKind {
    Directory,
    File,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Directory => "Directory",
            EntryKind::File => "File",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immediate child of a directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub name: String,
    pub kind: EntryKind,
}

/// Interactive session: display name plus the virtual working directory
#[derive(Debug, Clone)]
pub struct Session {
    /// Name shown in the welcome and farewell messages
    display_name: String,
    /// Current virtual working directory (always absolute)
    current_dir: PathBuf,
}

impl Session {
    /// Start a session at `start_dir`, which must be an existing directory
    pub fn new(display_name: impl Into<String>, start_dir: impl AsRef<Path>) -> Result<Self> {
        let start_dir = path::normalize(start_dir.as_ref());
        verify_directory(&start_dir)?;
        Ok(Self {
            display_name: display_name.into(),
            current_dir: start_dir,
        })
    }

    /// Start a session in the user's home directory, or the filesystem root
    /// if the home directory is unavailable
    pub fn at_home(display_name: impl Into<String>, home: Option<PathBuf>) -> Result<Self> {
        let display_name = display_name.into();
        if let Some(home) = home {
            match Self::new(display_name.clone(), &home) {
                Ok(session) => return Ok(session),
                Err(e) => warn!("Home directory {} unusable: {}", home.display(), e),
            }
        }
        Self::new(display_name, filesystem_root())
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// Resolve user input against the cursor
    pub fn resolve(&self, input: &str) -> PathBuf {
        path::resolve(&self.current_dir, input)
    }

    /// Move to the parent directory.
    ///
    /// Returns the new location, or `None` when already at the root.
    pub fn up(&mut self) -> Option<&Path> {
        let parent = path::parent(&self.current_dir);
        if parent == self.current_dir {
            debug!("Already at root: {}", self.current_dir.display());
            return None;
        }
        self.current_dir = parent;
        Some(&self.current_dir)
    }

    /// Change the cursor to `input`, resolved against the current directory.
    ///
    /// The target must exist and be a directory itself (a symlink to a
    /// directory is not followed); otherwise the cursor is left unchanged and
    /// an error is returned.
    pub async fn change_directory(&mut self, input: &str) -> Result<&Path> {
        let target = self.resolve(input);
        let metadata = tokio::fs::symlink_metadata(&target).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound {
                    path: target.clone(),
                }
            } else {
                Error::Io(e)
            }
        })?;

        if !metadata.is_dir() {
            return Err(Error::NotADirectory { path: target });
        }

        debug!("Cursor {} -> {}", self.current_dir.display(), target.display());
        self.current_dir = target;
        Ok(&self.current_dir)
    }
}

/// List the immediate entries of `dir`, sorted by name.
///
/// Either the whole listing is returned or an error; never a partial one.
pub async fn list(dir: &Path) -> Result<Vec<Entry>> {
    let mut read_dir = tokio::fs::read_dir(dir).await?;
    let mut entries = Vec::new();

    while let Some(entry) = read_dir.next_entry().await? {
        let file_type = entry.file_type().await?;
        entries.push(Entry {
            name: entry.file_name().to_string_lossy().into_owned(),
            kind: if file_type.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            },
        });
    }

    entries.sort_by(|a, b| collate(&a.name, &b.name));
    Ok(entries)
}

/// Render a listing as a `name`/`type` table.
///
/// An empty listing has no columns to show beyond `(index)`.
pub fn render_listing(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return table::render(&[], &[]);
    }
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|e| vec![e.name.clone(), e.kind.to_string()])
        .collect();
    table::render(&["name", "type"], &rows)
}

/// Root-locale collator shared by every listing
static COLLATOR: Lazy<Option<CollatorBorrowed<'static>>> = Lazy::new(|| {
    Collator::try_new(Default::default(), CollatorOptions::default())
        .map_err(|e| warn!("Collator unavailable, using case-folded order: {}", e))
        .ok()
});

/// Locale-aware name ordering (Unicode root collation).
///
/// Punctuation sorts before letters, accented letters sit next to their
/// base letter and lowercase precedes uppercase on a tie.
pub fn collate(a: &str, b: &str) -> Ordering {
    match COLLATOR.as_ref() {
        Some(collator) => collator.compare(a, b),
        None => fold_compare(a, b),
    }
}

/// Case-insensitive first, lowercase before uppercase, then code points
fn fold_compare(a: &str, b: &str) -> Ordering {
    let folded = a.to_lowercase().cmp(&b.to_lowercase());
    if folded != Ordering::Equal {
        return folded;
    }

    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca != cb {
            return match (ca.is_lowercase(), cb.is_lowercase()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => ca.cmp(&cb),
            };
        }
    }
    a.len().cmp(&b.len())
}

fn verify_directory(dir: &Path) -> Result<()> {
    match std::fs::metadata(dir) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(Error::NotADirectory {
            path: dir.to_path_buf(),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(Error::NotFound {
            path: dir.to_path_buf(),
        }),
        Err(e) => Err(Error::Io(e)),
    }
}

fn filesystem_root() -> PathBuf {
    std::env::current_dir()
        .ok()
        .and_then(|dir| dir.ancestors().last().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from(std::path::MAIN_SEPARATOR_STR))
}
