mod codes;

pub use codes::ExitCode;

use crate::library::{CacheError, ScanError, TranscriptError};
use crate::scanner::ScannerError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Library not found: {path}")]
    LibraryNotFound { path: PathBuf },

    #[error("Path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to create {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Transcript(#[from] TranscriptError),

    #[error("Failed to read input: {0}")]
    Input(std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AppError::LibraryNotFound { .. } => ExitCode::LibraryNotFound,
            AppError::NotADirectory { .. } => ExitCode::LibraryNotFound,
            AppError::PermissionDenied { .. } => ExitCode::PermissionError,
            AppError::CreateDirectory { .. } => ExitCode::PermissionError,
            AppError::Cache(_) => ExitCode::CacheError,
            AppError::Transcript(_) => ExitCode::TranscriptError,
            AppError::Input(_) => ExitCode::InputError,
            AppError::Other(_) => ExitCode::GeneralError,
        }
    }

    pub fn detailed_message(&self) -> String {
        match self {
            AppError::LibraryNotFound { path } => {
                format!(
                    "The library path does not exist:\n  {}\n\n\
                     Pass --library-path or set EPISODIFY_LIBRARY_PATH.",
                    path.display()
                )
            }

            AppError::NotADirectory { path } => {
                format!(
                    "The specified path is not a directory:\n  {}\n\n\
                     Please provide a valid directory path.",
                    path.display()
                )
            }

            AppError::PermissionDenied { path } => {
                format!(
                    "Permission denied when accessing:\n  {}\n\n\
                     Please check file permissions or run with appropriate privileges.",
                    path.display()
                )
            }

            AppError::CreateDirectory { path, source } => {
                format!(
                    "Failed to create directory:\n  {}\n  {}\n\n\
                     Please check file permissions.",
                    path.display(),
                    source
                )
            }

            AppError::Cache(err) => {
                format!(
                    "{}\n\n\
                     The processed-shows cache is a plain list of folder names, one per line.\n\
                     Fix or delete it to rebuild it on the next scan.",
                    err
                )
            }

            AppError::Transcript(err) => {
                format!(
                    "{}\n\n\
                     The transcript is written under the library's .library/logs folder.",
                    err
                )
            }

            AppError::Input(err) => format!("Failed to read input: {}", err),

            AppError::Other(message) => message.clone(),
        }
    }
}

impl From<ScannerError> for AppError {
    fn from(err: ScannerError) -> Self {
        match err {
            ScannerError::PathNotFound(path) => AppError::LibraryNotFound { path },
            ScannerError::NotADirectory(path) => AppError::NotADirectory { path },
            ScannerError::PermissionDenied(path) => AppError::PermissionDenied { path },
            ScannerError::IoError(e) => AppError::Other(format!("I/O error: {}", e)),
        }
    }
}

impl From<ScanError> for AppError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::Scanner(e) => e.into(),
            ScanError::CreateShowsDir { path, source } => AppError::CreateDirectory { path, source },
            ScanError::Cache(e) => AppError::Cache(e),
            ScanError::Transcript(e) => AppError::Transcript(e),
            ScanError::Prompt(e) => AppError::Input(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let err = AppError::LibraryNotFound {
            path: PathBuf::from("/test"),
        };
        assert_eq!(err.exit_code(), ExitCode::LibraryNotFound);

        let err = AppError::PermissionDenied {
            path: PathBuf::from("/test"),
        };
        assert_eq!(err.exit_code(), ExitCode::PermissionError);

        let err = AppError::Cache(CacheError::InvalidName(String::new()));
        assert_eq!(err.exit_code(), ExitCode::CacheError);
    }

    #[test]
    fn test_detailed_message_includes_context() {
        let err = AppError::LibraryNotFound {
            path: PathBuf::from("/media/library"),
        };

        let msg = err.detailed_message();
        assert!(msg.contains("/media/library"));
        assert!(msg.contains("EPISODIFY_LIBRARY_PATH"));
    }

    #[test]
    fn test_scanner_error_conversion() {
        let scanner_err = ScannerError::PathNotFound(PathBuf::from("/missing"));
        let app_err: AppError = scanner_err.into();
        assert_eq!(app_err.exit_code(), ExitCode::LibraryNotFound);
    }

    #[test]
    fn test_scan_error_conversion() {
        let scan_err = ScanError::Scanner(ScannerError::NotADirectory(PathBuf::from("/file")));
        let app_err: AppError = scan_err.into();
        assert!(matches!(app_err, AppError::NotADirectory { .. }));

        let scan_err = ScanError::Prompt(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "closed",
        ));
        let app_err: AppError = scan_err.into();
        assert_eq!(app_err.exit_code(), ExitCode::InputError);
    }
}
