//! Repository crawling.
//!
//! The inference engine works on a plain list of repository-relative paths.
//! This module produces that list from a folder on disk and supplies the
//! matching [`ReadFile`] implementation.
//!
//! Paths always use `/` separators and are sorted, so results do not depend
//! on platform or directory iteration order. Version control metadata and
//! installed dependencies are skipped without being descended into:
//!
//! | Pruned folder | Why |
//! |---|---|
//! | `.git/` | repository internals |
//! | `node_modules/` | installed packages, often tens of thousands of files |

use crate::data::ReadFile;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

const PRUNED_FOLDERS: &[&str] = &[".git", "node_modules"];

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

fn is_pruned(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| PRUNED_FOLDERS.contains(&name))
}

/// `root`-relative path with `/` separators. `None` for non-UTF-8 names.
fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Option<Vec<&str>> = relative
        .components()
        .map(|component| component.as_os_str().to_str())
        .collect();
    Some(parts?.join("/"))
}

/// Every file under `root`, as sorted repository-relative paths.
pub fn scan_paths(root: &Path) -> Result<Vec<String>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let mut paths = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| !is_pruned(entry));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        match relative_path(root, entry.path()) {
            Some(path) => paths.push(path),
            None => trace!(path = %entry.path().display(), "skipping non-UTF-8 path"),
        }
    }

    paths.sort();
    debug!(root = %root.display(), files = paths.len(), "scanned repository");
    Ok(paths)
}

/// Reads repository files relative to a root folder.
#[derive(Debug, Clone)]
pub struct FsReader {
    root: PathBuf,
}

impl FsReader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ReadFile for FsReader {
    fn read_file(&self, path: &str) -> Option<String> {
        let full_path = self.root.join(path);
        match std::fs::read_to_string(&full_path) {
            Ok(contents) => Some(contents),
            Err(e) => {
                trace!(path = %full_path.display(), error = %e, "unreadable file");
                None
            }
        }
    }
}
