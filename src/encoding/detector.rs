use std::fmt;

/// Detections at or below this confidence are rejected.
pub const CONFIDENCE_THRESHOLD: f32 = 0.9;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Result of running encoding detection over a byte buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Lower-cased encoding name, e.g. `utf-8`, `utf-8-sig`, `windows-1251`
    pub encoding: String,
    /// Detector confidence in `0.0..=1.0`
    pub confidence: f32,
}

impl Detection {
    pub fn new(encoding: impl Into<String>, confidence: f32) -> Self {
        Self {
            encoding: encoding.into().to_lowercase(),
            confidence,
        }
    }

    pub fn is_utf8(&self) -> bool {
        matches!(self.encoding.as_str(), "utf-8" | "utf-8-sig")
    }

    pub fn is_confident(&self) -> bool {
        self.confidence > CONFIDENCE_THRESHOLD
    }
}

impl fmt::Display for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ({:.0}%)", self.encoding, self.confidence * 100.0)
    }
}

/// Statistical encoding detection over raw bytes.
pub trait EncodingDetector {
    fn detect_bytes(&self, bytes: &[u8]) -> Detection;
}

/// Detector backed by the `chardet` crate.
///
/// A UTF-8 byte order mark is reported as `utf-8-sig` and an empty buffer as
/// `utf-8`, both with full confidence.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChardetDetector;

impl EncodingDetector for ChardetDetector {
    fn detect_bytes(&self, bytes: &[u8]) -> Detection {
        if bytes.starts_with(UTF8_BOM) {
            return Detection::new("utf-8-sig", 1.0);
        }
        if bytes.is_empty() {
            return Detection::new("utf-8", 1.0);
        }

        let (charset, confidence, _language) = chardet::detect(&bytes.to_vec());
        Detection::new(charset, confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_lowercases_name() {
        let detection = Detection::new("UTF-8-SIG", 1.0);
        assert_eq!(detection.encoding, "utf-8-sig");
        assert!(detection.is_utf8());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        assert!(!Detection::new("windows-1251", 0.9).is_confident());
        assert!(Detection::new("windows-1251", 0.91).is_confident());
    }

    #[test]
    fn test_non_utf8_names() {
        assert!(!Detection::new("ascii", 1.0).is_utf8());
        assert!(!Detection::new("windows-1252", 1.0).is_utf8());
    }

    #[test]
    fn test_chardet_detector_reports_bom() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("1\n00:00:01,000 --> 00:00:02,000\nHello\n".as_bytes());

        let detection = ChardetDetector.detect_bytes(&bytes);
        assert_eq!(detection, Detection::new("utf-8-sig", 1.0));
    }

    #[test]
    fn test_chardet_detector_empty_buffer() {
        let detection = ChardetDetector.detect_bytes(&[]);
        assert!(detection.is_utf8());
        assert!(detection.is_confident());
    }

    #[test]
    fn test_display() {
        let detection = Detection::new("windows-1251", 0.99);
        assert_eq!(detection.to_string(), "[windows-1251] (99%)");
    }
}
