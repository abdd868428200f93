mod cache;
mod naming;
mod scan;
mod transcript;

pub use cache::{CacheError, ProcessedCache};
pub use naming::{derive_conventional_name, is_properly_named, validate_show_name, NamingError};
pub use scan::{
    resolve_show_folder, run_scan, Disposition, ScanError, ScanOptions, ScanSummary, ShowFolder,
    MAX_EPISODE_NUMBER,
};
pub use transcript::{Transcript, TranscriptError};

use std::path::{Path, PathBuf};

/// Folder under the library root holding one subfolder per show
pub const TV_SHOWS_FOLDER: &str = "TV Shows";

/// Tool-owned state under the library root
pub const STATE_FOLDER: &str = ".library";

const CACHE_FILE: &str = "library.cache";
const LOGS_FOLDER: &str = "logs";

/// Paths of a media library on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryLayout {
    root: PathBuf,
}

impl LibraryLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn shows_dir(&self) -> PathBuf {
        self.root.join(TV_SHOWS_FOLDER)
    }

    pub fn state_dir(&self) -> PathBuf {
        self.root.join(STATE_FOLDER)
    }

    pub fn cache_path(&self) -> PathBuf {
        self.state_dir().join(CACHE_FILE)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.state_dir().join(LOGS_FOLDER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_paths() {
        let layout = LibraryLayout::new("/media");

        assert_eq!(layout.shows_dir(), PathBuf::from("/media/TV Shows"));
        assert_eq!(
            layout.cache_path(),
            PathBuf::from("/media/.library/library.cache")
        );
        assert_eq!(layout.logs_dir(), PathBuf::from("/media/.library/logs"));
    }
}
