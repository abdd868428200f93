use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("I/O error on cache file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cache file {} is not valid UTF-8", path.display())]
    Corrupted { path: PathBuf },

    #[error("Show name cannot be cached: {0:?}")]
    InvalidName(String),
}

/// Names of show folders already handled, one per line.
///
/// The file only ever grows: each call to [`ProcessedCache::mark_processed`]
/// appends a single newline-terminated line.
#[derive(Debug)]
pub struct ProcessedCache {
    path: PathBuf,
    names: HashSet<String>,
}

impl ProcessedCache {
    /// Read the cache file; a missing file is an empty cache.
    pub fn load(path: &Path) -> Result<Self, CacheError> {
        let names = match fs::read(path) {
            Ok(bytes) => {
                let text = String::from_utf8(bytes).map_err(|_| CacheError::Corrupted {
                    path: path.to_path_buf(),
                })?;
                text.lines()
                    .filter(|line| !line.is_empty())
                    .map(str::to_string)
                    .collect()
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = ?path, "No cache file found, starting fresh");
                HashSet::new()
            }
            Err(source) => {
                return Err(CacheError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        info!(count = names.len(), "Loaded processed shows cache");

        Ok(Self {
            path: path.to_path_buf(),
            names,
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Record `name` as processed, appending it to the file immediately.
    pub fn mark_processed(&mut self, name: &str) -> Result<(), CacheError> {
        if name.is_empty() || name.contains(['\n', '\r']) {
            return Err(CacheError::InvalidName(name.to_string()));
        }

        if self.names.contains(name) {
            debug!(name = %name, "Already cached");
            return Ok(());
        }

        let io_err = |source| CacheError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut line = String::new();
        if self.needs_leading_newline().map_err(io_err)? {
            line.push('\n');
        }
        line.push_str(name);
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;
        file.write_all(line.as_bytes()).map_err(io_err)?;

        debug!(name = %name, path = ?self.path, "Marked as processed");
        self.names.insert(name.to_string());
        Ok(())
    }

    /// True when existing content lacks a trailing newline.
    fn needs_leading_newline(&self) -> std::io::Result<bool> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(bytes.last().is_some_and(|b| *b != b'\n')),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
