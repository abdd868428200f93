use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

const VIDEO_EXTENSIONS: &[&str] = &["mkv", "avi", "mp4", "mov", "wmv", "avchd", "webm", "flv"];
const SUBTITLE_EXTENSIONS: &[&str] = &["srt", "ass", "sub", "vtt", "ssa", "smi"];

/// Category table, in processing order.
const CATEGORY_TABLE: &[(FileCategory, &[&str])] = &[
    (FileCategory::Video, VIDEO_EXTENSIONS),
    (FileCategory::Subtitle, SUBTITLE_EXTENSIONS),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileCategory {
    Video,
    Subtitle,
}

impl FileCategory {
    /// All categories in the order a show folder processes them.
    pub fn all() -> impl Iterator<Item = FileCategory> {
        CATEGORY_TABLE.iter().map(|(category, _)| *category)
    }

    pub fn extensions(&self) -> &'static [&'static str] {
        CATEGORY_TABLE
            .iter()
            .find(|(category, _)| category == self)
            .map(|(_, extensions)| *extensions)
            .unwrap_or(&[])
    }

    /// Whether a folder may lack files of this category entirely.
    pub fn is_optional(&self) -> bool {
        matches!(self, FileCategory::Subtitle)
    }

    pub fn label(&self) -> &'static str {
        match self {
            FileCategory::Video => "videos",
            FileCategory::Subtitle => "subtitles",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("Unsupported file type: {}", path.display())]
    UnsupportedFileType { path: PathBuf },
}

/// Classify a path by its (case-insensitive) extension.
pub fn classify(path: &Path) -> Result<FileCategory, ClassifyError> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    CATEGORY_TABLE
        .iter()
        .find(|(_, extensions)| extensions.contains(&extension.as_str()))
        .map(|(category, _)| *category)
        .ok_or_else(|| ClassifyError::UnsupportedFileType {
            path: path.to_path_buf(),
        })
}

/// A file inside a show folder together with its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub category: FileCategory,
}

impl FileEntry {
    pub fn classify(path: PathBuf) -> Result<Self, ClassifyError> {
        let category = classify(&path)?;
        Ok(Self { path, category })
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Extension including the leading dot, original case preserved.
    pub fn dotted_extension(&self) -> String {
        self.path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_video_extensions() {
        for ext in VIDEO_EXTENSIONS {
            let path = PathBuf::from(format!("episode.{}", ext));
            assert_eq!(classify(&path).unwrap(), FileCategory::Video);
        }
    }

    #[test]
    fn test_classify_subtitle_extensions() {
        for ext in SUBTITLE_EXTENSIONS {
            let path = PathBuf::from(format!("episode.{}", ext));
            assert_eq!(classify(&path).unwrap(), FileCategory::Subtitle);
        }
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify(Path::new("Pilot.MKV")).unwrap(), FileCategory::Video);
        assert_eq!(classify(Path::new("Pilot.Srt")).unwrap(), FileCategory::Subtitle);
    }

    #[test]
    fn test_unknown_extension_is_an_error() {
        let result = classify(Path::new("notes.txt"));
        assert!(matches!(
            result,
            Err(ClassifyError::UnsupportedFileType { .. })
        ));
    }

    #[test]
    fn test_missing_extension_is_an_error() {
        assert!(classify(Path::new("README")).is_err());
    }

    #[test]
    fn test_processing_order() {
        let order: Vec<_> = FileCategory::all().collect();
        assert_eq!(order, vec![FileCategory::Video, FileCategory::Subtitle]);
        assert!(FileCategory::Subtitle.is_optional());
        assert!(!FileCategory::Video.is_optional());
    }

    #[test]
    fn test_file_entry_extension_keeps_case() {
        let entry = FileEntry::classify(PathBuf::from("/show/Pilot.MKV")).unwrap();
        assert_eq!(entry.dotted_extension(), ".MKV");
        assert_eq!(entry.file_name(), "Pilot.MKV");
    }
}
