use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::executor::rename_batch;
use super::types::{RenameError, RenameOptions, RenameOutcome};
use crate::encoding::{normalize_batch, EncodingDetector, NormalizeOutcome};
use crate::media::{sort_natural, FileCategory, FileEntry};
use crate::scanner::list_files;
use crate::ui::Ui;

type Batches = BTreeMap<FileCategory, Vec<FileEntry>>;

/// Rename every episode file in one show folder.
///
/// Videos and subtitles are numbered independently from
/// `options.start_episode`; subtitles are optional but, when present, must pair
/// one-to-one with videos. Videos that are already named properly end the
/// folder without touching subtitles. Subtitle encodings are offered for conversion to
/// UTF-8 before anything is renamed.
pub fn rename_show_folder(
    folder: &Path,
    options: &RenameOptions,
    detector: &dyn EncodingDetector,
    ui: &mut Ui,
) -> RenameOutcome {
    let batches = match collect_batches(folder) {
        Ok(batches) => batches,
        Err(e) => return RenameOutcome::Error(e),
    };

    if let Err(e) = validate_pairing(&batches) {
        return RenameOutcome::Error(e);
    }

    let subtitles = batch(&batches, FileCategory::Subtitle);
    if !subtitles.is_empty() {
        normalize_subtitles(subtitles, options, detector, ui);
    }

    let mut renamed_any = false;
    for category in FileCategory::all() {
        let outcome = rename_batch(
            batch(&batches, category),
            options.season,
            options.start_episode,
            options.skip_confirmation,
            ui,
        );
        debug!(category = %category, outcome = %outcome, "Batch finished");

        match outcome {
            RenameOutcome::Success => renamed_any = true,
            RenameOutcome::NoFilesFound if category.is_optional() => {}
            // Only reachable after an earlier category renamed something
            RenameOutcome::AlreadyNamedProperly if renamed_any => {}
            other => return other,
        }
    }

    if renamed_any {
        info!(folder = ?folder, "Show folder renamed");
        RenameOutcome::Success
    } else {
        RenameOutcome::AlreadyNamedProperly
    }
}

fn batch(batches: &Batches, category: FileCategory) -> &[FileEntry] {
    batches.get(&category).map(Vec::as_slice).unwrap_or(&[])
}

/// List and classify the folder's files, grouped by category in natural order.
fn collect_batches(folder: &Path) -> Result<Batches, RenameError> {
    let mut batches: Batches = FileCategory::all().map(|c| (c, Vec::new())).collect();

    for path in list_files(folder)? {
        let entry = FileEntry::classify(path)?;
        batches.entry(entry.category).or_default().push(entry);
    }

    for files in batches.values_mut() {
        sort_natural(files, |entry| entry.file_name());
    }

    Ok(batches)
}

fn validate_pairing(batches: &Batches) -> Result<(), RenameError> {
    let videos = batch(batches, FileCategory::Video).len();
    let subtitles = batch(batches, FileCategory::Subtitle).len();

    if subtitles > 0 && subtitles != videos {
        return Err(RenameError::CountMismatch { videos, subtitles });
    }

    Ok(())
}

/// Encoding problems are reported but never stop the folder.
fn normalize_subtitles(
    subtitles: &[FileEntry],
    options: &RenameOptions,
    detector: &dyn EncodingDetector,
    ui: &mut Ui,
) {
    let paths: Vec<PathBuf> = subtitles.iter().map(|entry| entry.path.clone()).collect();

    match normalize_batch(&paths, detector, options.skip_confirmation, ui) {
        Ok(NormalizeOutcome::AlreadyUtf8) => {}
        Ok(NormalizeOutcome::Converted(count)) => {
            ui.success(&format!("Converted {} subtitle files to UTF-8", count));
        }
        Ok(NormalizeOutcome::Declined) => {
            ui.dim("Subtitle encodings left unchanged");
        }
        Err(e) => {
            warn!(error = %e, "Encoding normalization skipped");
            ui.warning(&format!("Encoding normalization skipped: {}", e));
        }
    }
}
