use chrono::{DateTime, Local};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
#[error("Transcript error on {}: {source}", path.display())]
pub struct TranscriptError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Plain-text copy of the console for one run.
#[derive(Debug)]
pub struct Transcript {
    path: PathBuf,
    file: File,
}

impl Transcript {
    /// File name for a run started at `started`
    pub fn file_name(started: &DateTime<Local>) -> String {
        format!("logs_{}.txt", started.format("%Y%m%d-%H%M%S"))
    }

    /// Open (append) the transcript for a run, creating the logs directory.
    pub fn create(logs_dir: &Path, started: &DateTime<Local>) -> Result<Self, TranscriptError> {
        fs::create_dir_all(logs_dir).map_err(|source| TranscriptError {
            path: logs_dir.to_path_buf(),
            source,
        })?;

        let path = logs_dir.join(Self::file_name(started));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| TranscriptError {
                path: path.clone(),
                source,
            })?;

        debug!(path = ?path, "Transcript opened");
        Ok(Self { path, file })
    }

    /// A fresh handle on the transcript file, suitable for [`crate::ui::Ui::mirrored`].
    pub fn sink(&self) -> Result<Box<dyn Write>, TranscriptError> {
        let handle = self.file.try_clone().map_err(|source| TranscriptError {
            path: self.path.clone(),
            source,
        })?;
        Ok(Box::new(handle))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn started() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 1, 15, 10, 30, 45).unwrap()
    }

    #[test]
    fn test_file_name() {
        assert_eq!(Transcript::file_name(&started()), "logs_20260115-103045.txt");
    }

    #[test]
    fn test_create_makes_logs_dir() {
        let dir = tempdir().unwrap();
        let logs = dir.path().join(".library").join("logs");

        let transcript = Transcript::create(&logs, &started()).unwrap();

        assert!(logs.is_dir());
        assert_eq!(transcript.path(), logs.join("logs_20260115-103045.txt"));
    }

    #[test]
    fn test_sinks_append() {
        let dir = tempdir().unwrap();
        let transcript = Transcript::create(dir.path(), &started()).unwrap();

        {
            let mut sink = transcript.sink().unwrap();
            writeln!(sink, "first").unwrap();
        }
        {
            let mut sink = transcript.sink().unwrap();
            writeln!(sink, "second").unwrap();
        }

        assert_eq!(
            fs::read_to_string(transcript.path()).unwrap(),
            "first\nsecond\n"
        );
    }
}
