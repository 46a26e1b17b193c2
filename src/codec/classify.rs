//! Content classification and algorithm selection.
//!
//! Classification is a pure function of the input bytes and is recomputed on
//! every call. The selector maps it to a codec; for binary content it also
//! looks at how run-heavy the input is.

use serde::{Deserialize, Serialize};

use super::Algorithm;

/// Number of leading bytes inspected for image signatures
pub const SIGNATURE_LEN: usize = 8;

/// Binary inputs with a run ratio above this pick RLE.
///
/// Fixed for compatibility with existing artifacts; not configurable.
pub const RLE_RATIO_THRESHOLD: f64 = 0.5;

const PNG_SIGNATURE: &[u8] = &[0x89, 0x50, 0x4E, 0x47];
const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF];
const GIF_PREFIX: &[u8] = b"GIF8";

/// Coarse content category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Printable ASCII plus tab, newline and carriage return
    Text,
    /// Starts with a PNG, JPEG or GIF signature
    Image,
    /// Anything else
    Binary,
    /// Not produced by [`classify`]; callers may supply it explicitly
    Unknown,
}

impl Classification {
    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Classification::Text => "text",
            Classification::Image => "image",
            Classification::Binary => "binary",
            Classification::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn is_text_byte(byte: u8) -> bool {
    matches!(byte, 32..=126 | b'\t' | b'\n' | b'\r')
}

fn has_image_signature(data: &[u8]) -> bool {
    if data.len() < SIGNATURE_LEN {
        return false;
    }
    let head = &data[..SIGNATURE_LEN];

    head.starts_with(PNG_SIGNATURE)
        || head.starts_with(JPEG_SIGNATURE)
        || (head.starts_with(GIF_PREFIX) && matches!(head[4], b'7' | b'9') && head[5] == b'a')
}

/// Classify raw bytes
pub fn classify(data: &[u8]) -> Classification {
    if data.iter().copied().all(is_text_byte) {
        return Classification::Text;
    }

    if has_image_signature(data) {
        return Classification::Image;
    }

    Classification::Binary
}

/// Number of maximal same-byte runs (unbounded length)
pub fn count_runs(data: &[u8]) -> usize {
    match data.split_first() {
        None => 0,
        Some((_, rest)) => 1 + data.iter().zip(rest).filter(|(a, b)| a != b).count(),
    }
}

/// `runs * 2 / len`; 0.0 for empty input
pub fn run_ratio(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    (count_runs(data) * 2) as f64 / data.len() as f64
}

/// Choose a codec for classified content
pub fn select_algorithm(classification: Classification, data: &[u8]) -> Algorithm {
    match classification {
        Classification::Text | Classification::Unknown => Algorithm::Lz77,
        Classification::Image => Algorithm::Rle,
        Classification::Binary => {
            if run_ratio(data) > RLE_RATIO_THRESHOLD {
                Algorithm::Rle
            } else {
                Algorithm::Lz77
            }
        },
    }
}
