//! Path resolution against the virtual working directory
//!
//! Resolution is purely lexical: nothing here touches the filesystem and
//! the process working directory is never consulted.

use std::path::{Component, Path, PathBuf};

/// Resolve user input against an absolute base directory.
///
/// Absolute inputs replace the base, relative inputs are joined to it, and
/// the result is normalized (`.` dropped, `..` pops one component). `..` at
/// the filesystem root is a no-op, and an empty input resolves to `base`.
pub fn resolve(base: &Path, input: &str) -> PathBuf {
    let input = Path::new(input);
    if input.is_absolute() {
        normalize(input)
    } else {
        normalize(&base.join(input))
    }
}

/// Lexically normalize a path without following symlinks
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => normalized.push(prefix.as_os_str()),
            Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                // PathBuf::pop refuses to remove the root, which is exactly
                // the policy `up` relies on.
                normalized.pop();
            }
            Component::Normal(part) => normalized.push(part),
        }
    }

    normalized
}

/// Parent of an absolute path; the root is its own parent
pub fn parent(path: &Path) -> PathBuf {
    resolve(path, "..")
}
