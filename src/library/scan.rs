use chrono::Local;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::cache::{CacheError, ProcessedCache};
use super::naming::{derive_conventional_name, is_properly_named, validate_show_name};
use super::transcript::{Transcript, TranscriptError};
use super::LibraryLayout;
use crate::encoding::EncodingDetector;
use crate::rename::{rename_show_folder, RenameOptions};
use crate::scanner::{scan_directory, DirectoryEntry, ScannerError};
use crate::ui::Ui;

/// Upper bound for season and episode numbers entered at the prompt
pub const MAX_EPISODE_NUMBER: u32 = 9999;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    Scanner(#[from] ScannerError),

    #[error("Failed to create {}: {source}", path.display())]
    CreateShowsDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Transcript(#[from] TranscriptError),

    #[error("Failed to read input: {0}")]
    Prompt(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Rename without asking for confirmation
    pub skip_confirmation: bool,
    /// Use season 1, episode 1 instead of prompting
    pub default_numbering: bool,
}

/// A show folder eligible for processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowFolder {
    pub name: String,
    pub path: PathBuf,
}

impl From<DirectoryEntry> for ShowFolder {
    fn from(entry: DirectoryEntry) -> Self {
        Self {
            name: entry.name,
            path: entry.path,
        }
    }
}

/// What happened to one show folder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Renamed (or already fine) and cached
    Processed,
    /// Failed, but the user chose to cache it anyway
    Acknowledged,
    /// Failed and left for a future run
    Pending,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub processed: usize,
    pub acknowledged: usize,
    pub pending: usize,
    pub cached: usize,
    pub skipped_invalid: usize,
}

impl ScanSummary {
    /// Folders that went through the renamer this run
    pub fn touched(&self) -> usize {
        self.processed + self.acknowledged + self.pending
    }

    fn record(&mut self, disposition: Disposition) {
        match disposition {
            Disposition::Processed => self.processed += 1,
            Disposition::Acknowledged => self.acknowledged += 1,
            Disposition::Pending => self.pending += 1,
        }
    }
}

/// Lazily opened transcript shared by every folder of one run
struct RunTranscript {
    logs_dir: PathBuf,
    transcript: Option<Transcript>,
}

impl RunTranscript {
    fn sink(&mut self) -> Result<Box<dyn Write>, TranscriptError> {
        let transcript = match self.transcript.take() {
            Some(t) => t,
            None => {
                let t = Transcript::create(&self.logs_dir, &Local::now())?;
                info!(path = ?t.path(), "Writing transcript");
                t
            }
        };
        let sink = transcript.sink();
        self.transcript = Some(transcript);
        sink
    }
}

/// Walk the library's show folders and rename the ones not processed yet.
pub fn run_scan(
    layout: &LibraryLayout,
    options: &ScanOptions,
    detector: &dyn EncodingDetector,
    ui: &mut Ui,
) -> Result<ScanSummary, ScanError> {
    let root = layout.root();
    if !root.exists() {
        return Err(ScannerError::PathNotFound(root.to_path_buf()).into());
    }
    if !root.is_dir() {
        return Err(ScannerError::NotADirectory(root.to_path_buf()).into());
    }

    let shows_dir = layout.shows_dir();
    if !shows_dir.exists() {
        fs::create_dir_all(&shows_dir).map_err(|source| ScanError::CreateShowsDir {
            path: shows_dir.clone(),
            source,
        })?;
        ui.info(&format!("Created {}", shows_dir.display()));
    }

    let mut cache = ProcessedCache::load(&layout.cache_path())?;
    let mut transcript = RunTranscript {
        logs_dir: layout.logs_dir(),
        transcript: None,
    };
    let mut summary = ScanSummary::default();

    let entries = scan_directory(&shows_dir)?;
    info!(count = entries.len(), "Found show folders");

    for entry in entries {
        let folder = if is_properly_named(&entry.name) {
            ShowFolder::from(entry)
        } else {
            let sink = transcript.sink()?;
            match ui.mirrored(sink, |ui| resolve_show_folder(&entry, options, ui))? {
                Some(folder) => folder,
                None => {
                    summary.skipped_invalid += 1;
                    continue;
                }
            }
        };

        if cache.contains(&folder.name) {
            debug!(name = %folder.name, "Already processed, skipping");
            summary.cached += 1;
            continue;
        }

        let sink = transcript.sink()?;
        let disposition = ui.mirrored(sink, |ui| process_show(&folder, options, detector, ui))?;

        if disposition != Disposition::Pending {
            cache.mark_processed(&folder.name)?;
        }
        summary.record(disposition);
    }

    report_summary(&summary, ui);
    Ok(summary)
}

/// Rename one show folder's files and decide whether to cache it.
fn process_show(
    folder: &ShowFolder,
    options: &ScanOptions,
    detector: &dyn EncodingDetector,
    ui: &mut Ui,
) -> std::io::Result<Disposition> {
    ui.section(&folder.name);

    let (season, start_episode) = if options.default_numbering {
        (1, 1)
    } else {
        (
            ui.ask_number("Enter season", MAX_EPISODE_NUMBER)?,
            ui.ask_number("Enter start episode", MAX_EPISODE_NUMBER)?,
        )
    };

    let rename_options = RenameOptions {
        season,
        start_episode,
        skip_confirmation: options.skip_confirmation,
    };

    let outcome = rename_show_folder(&folder.path, &rename_options, detector, ui);
    info!(name = %folder.name, outcome = %outcome, "Show folder finished");

    if outcome.is_success() {
        ui.success(outcome.message());
        return Ok(Disposition::Processed);
    }

    ui.error(&outcome.to_string());
    if ui.confirm("Mark as processed anyway?")? {
        Ok(Disposition::Acknowledged)
    } else {
        Ok(Disposition::Pending)
    }
}

/// Bring a show folder in line with `"<name> (<year>)"`.
///
/// Conforming folders pass through untouched. Otherwise a derived name is
/// offered first, then one is asked for. Returns `None` when the folder should
/// be skipped.
pub fn resolve_show_folder(
    entry: &DirectoryEntry,
    options: &ScanOptions,
    ui: &mut Ui,
) -> std::io::Result<Option<ShowFolder>> {
    if is_properly_named(&entry.name) {
        return Ok(Some(ShowFolder::from(entry.clone())));
    }

    ui.warning(&format!("Invalid TV show name: {}", entry.name));

    let mut new_name = None;
    if let Some(derived) = derive_conventional_name(&entry.name) {
        if options.skip_confirmation
            || ui.confirm(&format!("Rename folder to \"{}\"?", derived))?
        {
            new_name = Some(derived);
        }
    }

    let new_name = match new_name {
        Some(name) => name,
        None => loop {
            let answer = ui.ask_line("Enter name as \"<name> (<year>)\" (empty to skip)")?;
            let answer = answer.as_deref().map(str::trim).unwrap_or_default();

            if answer.is_empty() {
                warn!(name = %entry.name, "Skipping misnamed show folder");
                ui.warning(&format!("Skipped {}", entry.name));
                return Ok(None);
            }

            match validate_show_name(answer) {
                Ok(()) => break answer.to_string(),
                Err(e) => ui.warning(&e.to_string()),
            }
        },
    };

    let target = entry.path.with_file_name(&new_name);
    if target.exists() {
        ui.warning(&format!(
            "Cannot rename \"{}\": \"{}\" already exists, skipping",
            entry.name, new_name
        ));
        return Ok(None);
    }

    if let Err(e) = fs::rename(&entry.path, &target) {
        warn!(error = %e, from = %entry.name, to = %new_name, "Folder rename failed");
        ui.warning(&format!("Cannot rename \"{}\": {}, skipping", entry.name, e));
        return Ok(None);
    }

    ui.success(&format!("Renamed folder \"{}\" to \"{}\"", entry.name, new_name));
    Ok(Some(ShowFolder {
        name: new_name,
        path: target,
    }))
}

fn report_summary(summary: &ScanSummary, ui: &mut Ui) {
    if summary.touched() == 0 {
        ui.info("No new shows to process");
        return;
    }

    ui.section("Summary");
    ui.kv("Processed", &summary.processed.to_string());
    if summary.acknowledged > 0 {
        ui.kv("Marked despite errors", &summary.acknowledged.to_string());
    }
    if summary.pending > 0 {
        ui.kv("Left for next run", &summary.pending.to_string());
    }
    if summary.cached > 0 {
        ui.kv("Already processed", &summary.cached.to_string());
    }
    if summary.skipped_invalid > 0 {
        ui.kv("Skipped (invalid name)", &summary.skipped_invalid.to_string());
    }
}
