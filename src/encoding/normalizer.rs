use encoding_rs::Encoding;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::detector::{Detection, EncodingDetector, CONFIDENCE_THRESHOLD};
use crate::ui::Ui;

#[derive(Error, Debug)]
pub enum EncodingError {
    #[error(
        "Cannot determine encoding of {}: best guess {} with confidence {:.2} (need > {})",
        path.display(), detection.encoding, detection.confidence, CONFIDENCE_THRESHOLD
    )]
    Undetermined { path: PathBuf, detection: Detection },

    #[error("Unsupported encoding '{encoding}' for {}", path.display())]
    UnsupportedEncoding { path: PathBuf, encoding: String },

    #[error("{} is not valid {encoding}", path.display())]
    Malformed { path: PathBuf, encoding: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read confirmation: {0}")]
    Prompt(#[source] std::io::Error),
}

/// Per-file detection results for one batch, in input order.
#[derive(Debug, Clone, Default)]
pub struct EncodingReport {
    entries: Vec<(PathBuf, Detection)>,
}

impl EncodingReport {
    pub fn entries(&self) -> &[(PathBuf, Detection)] {
        &self.entries
    }

    /// True when every file is already UTF-8 (with or without BOM).
    pub fn is_canonical(&self) -> bool {
        self.entries.iter().all(|(_, detection)| detection.is_utf8())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug)]
pub enum NormalizeOutcome {
    /// Every file already UTF-8; nothing was shown or asked
    AlreadyUtf8,
    /// Number of files rewritten as UTF-8
    Converted(usize),
    Declined,
}

/// Detect the encoding of one file.
pub fn detect_file(path: &Path, detector: &dyn EncodingDetector) -> Result<Detection, EncodingError> {
    let bytes = fs::read(path).map_err(|source| EncodingError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let detection = detector.detect_bytes(&bytes);
    debug!(path = ?path, encoding = %detection.encoding, confidence = detection.confidence, "Detected encoding");

    if !detection.is_confident() {
        return Err(EncodingError::Undetermined {
            path: path.to_path_buf(),
            detection,
        });
    }

    Ok(detection)
}

/// Map a detector name onto an `encoding_rs` encoding.
fn resolve_encoding(name: &str) -> Option<&'static Encoding> {
    match name {
        "utf-8-sig" => Some(encoding_rs::UTF_8),
        "maccyrillic" => Some(encoding_rs::X_MAC_CYRILLIC),
        other => Encoding::for_label(other.as_bytes()),
    }
}

/// Rewrite `path` in place as UTF-8 (without BOM), decoding with the detected encoding.
pub fn convert_to_utf8(path: &Path, detection: &Detection) -> Result<(), EncodingError> {
    let text = decode_file(path, detection)?;
    write_utf8(path, &text)?;

    info!(path = ?path, from = %detection.encoding, "Converted to UTF-8");
    Ok(())
}

/// Read `path` and decode it with the detected encoding.
fn decode_file(path: &Path, detection: &Detection) -> Result<String, EncodingError> {
    let encoding =
        resolve_encoding(&detection.encoding).ok_or_else(|| EncodingError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: detection.encoding.clone(),
        })?;

    let bytes = fs::read(path).map_err(|source| EncodingError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let (text, had_errors) = encoding.decode_with_bom_removal(&bytes);
    if had_errors {
        return Err(EncodingError::Malformed {
            path: path.to_path_buf(),
            encoding: detection.encoding.clone(),
        });
    }

    Ok(text.into_owned())
}

/// Write to a sibling temp file, then rename it over `path`.
///
/// The temp file never outlives a failed write.
fn write_utf8(path: &Path, text: &str) -> Result<(), EncodingError> {
    let mut temp_name = path.as_os_str().to_os_string();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    if let Err(source) = fs::write(&temp_path, text.as_bytes()) {
        let _ = fs::remove_file(&temp_path);
        return Err(EncodingError::Io {
            path: temp_path,
            source,
        });
    }

    if let Err(source) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(EncodingError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}

/// Detect every file's encoding and, unless all are UTF-8 already, show the
/// report and offer to convert the whole batch.
///
/// Files are only touched after confirmation (or with `auto_confirm`). When
/// converting, every file in the batch is rewritten.
pub fn normalize_batch(
    paths: &[PathBuf],
    detector: &dyn EncodingDetector,
    auto_confirm: bool,
    ui: &mut Ui,
) -> Result<NormalizeOutcome, EncodingError> {
    let mut report = EncodingReport::default();
    for path in paths {
        let detection = detect_file(path, detector)?;
        report.entries.push((path.clone(), detection));
    }

    if report.is_canonical() {
        debug!(count = report.len(), "All subtitles already UTF-8");
        return Ok(NormalizeOutcome::AlreadyUtf8);
    }

    for (path, detection) in report.entries() {
        ui.plain(&format!("\"{}\" {}", path.display(), detection));
    }

    let confirmed = auto_confirm
        || ui
            .confirm("The encoding is different from UTF-8. Convert these files to UTF-8?")
            .map_err(EncodingError::Prompt)?;

    if !confirmed {
        warn!("Encoding conversion declined");
        return Ok(NormalizeOutcome::Declined);
    }

    // Decode the whole batch before writing any file
    let decoded = report
        .entries()
        .iter()
        .map(|(path, detection)| decode_file(path, detection).map(|text| (path, detection, text)))
        .collect::<Result<Vec<_>, _>>()?;

    for (path, detection, text) in &decoded {
        write_utf8(path, text)?;
        info!(path = ?path, from = %detection.encoding, "Converted to UTF-8");
    }

    Ok(NormalizeOutcome::Converted(report.len()))
}
