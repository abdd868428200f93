pub mod cli;
pub mod encoding;
pub mod error;
pub mod library;
pub mod logging;
pub mod media;
pub mod rename;
pub mod scanner;
pub mod ui;

pub use error::{AppError, ExitCode};
pub use library::{run_scan, LibraryLayout, ScanOptions, ScanSummary};
pub use rename::{rename_show_folder, RenameOptions, RenameOutcome};
pub use scanner::{list_files, scan_directory, DirectoryEntry, ScannerError};
