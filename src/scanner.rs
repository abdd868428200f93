use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("Path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Failed to read directory: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: PathBuf,
}

impl DirectoryEntry {
    pub fn new(name: String, path: PathBuf) -> Self {
        Self { name, path }
    }
}

fn read_dir_checked(target: &Path) -> Result<fs::ReadDir, ScannerError> {
    if !target.exists() {
        return Err(ScannerError::PathNotFound(target.to_path_buf()));
    }

    if !target.is_dir() {
        return Err(ScannerError::NotADirectory(target.to_path_buf()));
    }

    fs::read_dir(target).map_err(|e| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            ScannerError::PermissionDenied(target.to_path_buf())
        } else {
            ScannerError::IoError(e)
        }
    })
}

/// List the visible subdirectories of `target`, sorted by name.
pub fn scan_directory(target: &Path) -> Result<Vec<DirectoryEntry>, ScannerError> {
    debug!(path = ?target, "Scanning directory");

    let mut entries = Vec::new();

    for entry in read_dir_checked(target)? {
        let entry = entry?;
        let path = entry.path();

        trace!(entry = ?path, "Examining entry");

        if !path.is_dir() {
            trace!(path = ?path, "Skipping non-directory");
            continue;
        }

        let name = match path.file_name() {
            Some(n) => n.to_string_lossy().to_string(),
            None => continue,
        };

        if name.starts_with('.') {
            trace!(name = %name, "Skipping hidden directory");
            continue;
        }

        debug!(name = %name, "Found subdirectory");
        entries.push(DirectoryEntry::new(name, path));
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));

    debug!(count = entries.len(), "Scan complete");

    Ok(entries)
}

/// List the regular files directly inside `target`.
///
/// Hidden files are included: a show folder is expected to hold media only.
pub fn list_files(target: &Path) -> Result<Vec<PathBuf>, ScannerError> {
    let mut files = Vec::new();

    for entry in read_dir_checked(target)? {
        let path = entry?.path();
        if path.is_file() {
            trace!(path = ?path, "Found file");
            files.push(path);
        }
    }

    files.sort();
    debug!(path = ?target, count = files.len(), "Listed files");

    Ok(files)
}
