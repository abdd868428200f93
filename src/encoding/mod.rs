mod detector;
mod normalizer;

pub use detector::{ChardetDetector, Detection, EncodingDetector, CONFIDENCE_THRESHOLD};
pub use normalizer::{
    convert_to_utf8, detect_file, normalize_batch, EncodingError, EncodingReport,
    NormalizeOutcome,
};
