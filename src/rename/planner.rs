use std::path::PathBuf;
use tracing::{debug, warn};

use super::types::RenameError;
use crate::media::{sort_natural, FileCategory, FileEntry};

/// A single planned file rename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRename {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl PlannedRename {
    pub fn source_name(&self) -> String {
        file_name(&self.source)
    }

    pub fn destination_name(&self) -> String {
        file_name(&self.destination)
    }
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Renames for one category of files in one folder, in episode order.
///
/// Files that already carry their target name are left out, so an empty plan
/// means "already named properly".
#[derive(Debug, Clone)]
pub struct RenamePlan {
    pub category: FileCategory,
    pub season: u32,
    pub extension: String,
    pub entries: Vec<PlannedRename>,
}

impl RenamePlan {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Canonical episode file name, e.g. `S1E3.mkv`
pub fn episode_file_name(season: u32, episode: u32, extension: &str) -> String {
    format!("S{}E{}{}", season, episode, extension)
}

/// Plan renames for a batch of same-category files.
///
/// Files are numbered in natural order of their names starting at
/// `start_episode`. The first file's extension (in natural order) is used for
/// every target. Returns `None` when `files` is empty.
pub fn plan_renames(
    files: &[FileEntry],
    season: u32,
    start_episode: u32,
) -> Result<Option<RenamePlan>, RenameError> {
    let mut ordered = files.to_vec();
    sort_natural(&mut ordered, |entry| entry.file_name());

    let Some(first) = ordered.first() else {
        return Ok(None);
    };
    let category = first.category;
    let extension = first.dotted_extension();

    let mut entries = Vec::new();
    for (index, entry) in ordered.iter().enumerate() {
        let own_extension = entry.dotted_extension();
        if !own_extension.eq_ignore_ascii_case(&extension) {
            warn!(
                file = %entry.file_name(),
                extension = %extension,
                "Extension differs from the rest of the batch"
            );
        }

        let episode = u32::try_from(index)
            .ok()
            .and_then(|offset| start_episode.checked_add(offset))
            .ok_or_else(|| RenameError::EpisodeOutOfRange {
                start_episode,
                count: ordered.len(),
            })?;
        let target = episode_file_name(season, episode, &extension);
        let destination = entry
            .path
            .parent()
            .map(|dir| dir.join(&target))
            .unwrap_or_else(|| PathBuf::from(&target));

        if destination == entry.path {
            debug!(file = %target, "Already named properly");
            continue;
        }

        entries.push(PlannedRename {
            source: entry.path.clone(),
            destination,
        });
    }

    Ok(Some(RenamePlan {
        category,
        season,
        extension,
        entries,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn entries(dir: &Path, names: &[&str]) -> Vec<FileEntry> {
        names
            .iter()
            .map(|name| FileEntry::classify(dir.join(name)).unwrap())
            .collect()
    }

    fn pairs(plan: &RenamePlan) -> Vec<(String, String)> {
        plan.entries
            .iter()
            .map(|e| (e.source_name(), e.destination_name()))
            .collect()
    }

    #[test]
    fn test_episode_file_name() {
        assert_eq!(episode_file_name(1, 3, ".mkv"), "S1E3.mkv");
        assert_eq!(episode_file_name(12, 105, ".srt"), "S12E105.srt");
    }

    #[test]
    fn test_plan_basic() {
        let dir = Path::new("/library/TV Shows/Foo (1999)");
        let plan = plan_renames(&entries(dir, &["b.mkv", "a.mkv"]), 2, 5).unwrap().unwrap();

        assert_eq!(
            pairs(&plan),
            vec![
                ("a.mkv".to_string(), "S2E5.mkv".to_string()),
                ("b.mkv".to_string(), "S2E6.mkv".to_string()),
            ]
        );
        assert_eq!(plan.entries[0].destination, dir.join("S2E5.mkv"));
        assert_eq!(plan.category, FileCategory::Video);
    }

    #[test]
    fn test_plan_uses_natural_order() {
        let dir = Path::new("/show");
        let plan = plan_renames(&entries(dir, &["ep2.mkv", "ep10.mkv", "ep1.mkv"]), 1, 1).unwrap().unwrap();

        assert_eq!(
            pairs(&plan),
            vec![
                ("ep1.mkv".to_string(), "S1E1.mkv".to_string()),
                ("ep2.mkv".to_string(), "S1E2.mkv".to_string()),
                ("ep10.mkv".to_string(), "S1E3.mkv".to_string()),
            ]
        );
    }

    #[test]
    fn test_plan_skips_correct_names() {
        let dir = Path::new("/show");
        let plan = plan_renames(&entries(dir, &["S1E1.mkv", "extra.mkv"]), 1, 1).unwrap().unwrap();

        assert_eq!(
            pairs(&plan),
            vec![("extra.mkv".to_string(), "S1E2.mkv".to_string())]
        );
    }

    #[test]
    fn test_plan_is_a_fixed_point() {
        let dir = Path::new("/show");
        let names: Vec<String> = (1..=12).map(|i| format!("Episode {}.mkv", i)).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();

        let first = plan_renames(&entries(dir, &names), 3, 1).unwrap().unwrap();
        assert_eq!(first.len(), 12);

        let renamed: Vec<FileEntry> = first
            .entries
            .iter()
            .map(|e| FileEntry::classify(e.destination.clone()).unwrap())
            .collect();
        let second = plan_renames(&renamed, 3, 1).unwrap().unwrap();

        assert!(second.is_empty());
    }

    #[test]
    fn test_empty_input_has_no_plan() {
        assert!(plan_renames(&[], 1, 1).unwrap().is_none());
    }

    #[test]
    fn test_first_extension_is_authoritative() {
        let dir = Path::new("/show");
        let plan = plan_renames(&entries(dir, &["a.avi", "b.mkv"]), 1, 1).unwrap().unwrap();

        assert_eq!(plan.extension, ".avi");
        assert_eq!(plan.entries[1].destination_name(), "S1E2.avi");
    }

    #[test]
    fn test_start_episode_zero() {
        let dir = Path::new("/show");
        let plan = plan_renames(&entries(dir, &["pilot.srt"]), 1, 0).unwrap().unwrap();
        assert_eq!(plan.entries[0].destination_name(), "S1E0.srt");
    }

    #[test]
    fn test_episode_numbers_cannot_overflow() {
        let dir = Path::new("/show");
        let result = plan_renames(&entries(dir, &["a.mkv", "b.mkv"]), 1, u32::MAX);

        assert!(matches!(
            result,
            Err(RenameError::EpisodeOutOfRange {
                start_episode: u32::MAX,
                count: 2
            })
        ));
    }
}
