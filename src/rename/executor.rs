use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::planner::{plan_renames, PlannedRename, RenamePlan};
use super::types::{RenameError, RenameOutcome};
use crate::media::FileEntry;
use crate::ui::Ui;

/// Plan and execute renames for one batch of same-category files.
pub fn rename_batch(
    files: &[FileEntry],
    season: u32,
    start_episode: u32,
    skip_confirmation: bool,
    ui: &mut Ui,
) -> RenameOutcome {
    match plan_renames(files, season, start_episode) {
        Ok(Some(plan)) => execute_plan(&plan, skip_confirmation, ui),
        Ok(None) => RenameOutcome::NoFilesFound,
        Err(e) => RenameOutcome::Error(e),
    }
}

/// Preview a plan, ask for confirmation, then perform every rename in order.
///
/// A failed rename stops the batch; renames already performed stay in place.
pub fn execute_plan(plan: &RenamePlan, skip_confirmation: bool, ui: &mut Ui) -> RenameOutcome {
    if plan.is_empty() {
        debug!(category = %plan.category, "Nothing to rename");
        return RenameOutcome::AlreadyNamedProperly;
    }

    ui.info(&format!("Renaming {} {}:", plan.len(), plan.category));
    for entry in &plan.entries {
        ui.list_item(&entry.source_name(), &entry.destination_name());
    }

    if !skip_confirmation {
        match ui.confirm("Confirm rename") {
            Ok(true) => {}
            Ok(false) => return RenameOutcome::DeclinedByUser,
            Err(e) => return RenameOutcome::Error(RenameError::Prompt(e)),
        }
    }

    for entry in &plan.entries {
        if let Err(e) = rename_one(entry) {
            return RenameOutcome::Error(e);
        }
    }

    info!(count = plan.len(), category = %plan.category, "Renamed files");
    RenameOutcome::Success
}

fn rename_one(entry: &PlannedRename) -> Result<(), RenameError> {
    // A case-only rename on a case-insensitive filesystem finds the source itself
    if entry.destination.exists() && !is_same_file(&entry.source, &entry.destination) {
        return Err(RenameError::Collision {
            from: entry.source_name(),
            to: entry.destination_name(),
        });
    }

    debug!(from = ?entry.source, to = ?entry.destination, "Renaming");

    fs::rename(&entry.source, &entry.destination).map_err(|source| RenameError::Filesystem {
        from: entry.source_name(),
        to: entry.destination_name(),
        source,
    })
}

#[cfg(unix)]
fn is_same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
