use std::fmt;
use thiserror::Error;

use crate::media::ClassifyError;
use crate::scanner::ScannerError;

/// Options for renaming one show folder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenameOptions {
    pub season: u32,
    pub start_episode: u32,
    pub skip_confirmation: bool,
}

impl Default for RenameOptions {
    fn default() -> Self {
        Self {
            season: 1,
            start_episode: 1,
            skip_confirmation: false,
        }
    }
}

/// Errors that abort renaming a folder or a batch
#[derive(Error, Debug)]
pub enum RenameError {
    #[error(transparent)]
    UnsupportedFileType(#[from] ClassifyError),

    #[error("The number of videos and subtitles are different ({videos} videos, {subtitles} subtitles)")]
    CountMismatch { videos: usize, subtitles: usize },

    #[error("Episode numbers starting at {start_episode} cannot cover {count} files")]
    EpisodeOutOfRange { start_episode: u32, count: usize },

    #[error("Cannot rename '{from}' to '{to}': destination already exists")]
    Collision { from: String, to: String },

    #[error("Failed to rename '{from}' to '{to}': {source}")]
    Filesystem {
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list folder: {0}")]
    Scan(#[from] ScannerError),

    #[error("Failed to read confirmation: {0}")]
    Prompt(#[source] std::io::Error),
}

/// Terminal status of one batch or one whole folder
#[derive(Debug)]
pub enum RenameOutcome {
    Success,
    AlreadyNamedProperly,
    Error(RenameError),
    DeclinedByUser,
    NoFilesFound,
}

impl RenameOutcome {
    /// Process exit code for this outcome
    pub fn code(&self) -> i32 {
        match self {
            RenameOutcome::Success | RenameOutcome::AlreadyNamedProperly => 0,
            RenameOutcome::Error(_) => 1,
            RenameOutcome::DeclinedByUser => 2,
            RenameOutcome::NoFilesFound => 3,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RenameOutcome::Success => "Success",
            RenameOutcome::AlreadyNamedProperly => "Already named properly",
            RenameOutcome::Error(_) => "Error",
            RenameOutcome::DeclinedByUser => "Declined by user",
            RenameOutcome::NoFilesFound => "No files found",
        }
    }

    /// Success or nothing to do
    pub fn is_success(&self) -> bool {
        self.code() == 0
    }
}

impl fmt::Display for RenameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenameOutcome::Error(e) => write!(f, "{}: {}", self.message(), e),
            other => f.write_str(other.message()),
        }
    }
}
