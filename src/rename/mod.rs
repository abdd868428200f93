mod executor;
mod planner;
mod show;
mod types;

pub use executor::{execute_plan, rename_batch};
pub use planner::{episode_file_name, plan_renames, PlannedRename, RenamePlan};
pub use show::rename_show_folder;
pub use types::{RenameError, RenameOptions, RenameOutcome};
