//! Compression algorithm types and results.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};

/// Available compression algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Run-length encoding: `(count, byte)` pairs
    Rle,
    /// Windowed LZ77: `(offset, length, literal)` tokens
    Lz77,
}

impl Algorithm {
    /// Container header tag for this algorithm
    pub fn tag(&self) -> u8 {
        match self {
            Algorithm::Rle => 1,
            Algorithm::Lz77 => 2,
        }
    }

    /// Parse algorithm from a container header tag
    pub fn from_tag(tag: u8) -> Result<Self> {
        match tag {
            1 => Ok(Algorithm::Rle),
            2 => Ok(Algorithm::Lz77),
            other => Err(CodecError::UnsupportedAlgorithmTag(other)),
        }
    }

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Rle => "RLE",
            Algorithm::Lz77 => "LZ77",
        }
    }

    /// Get all available algorithms in tag order
    pub fn all() -> &'static [Algorithm] {
        &[Algorithm::Rle, Algorithm::Lz77]
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Algorithm {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "rle" | "r" => Ok(Algorithm::Rle),
            "lz77" | "lz" | "l" => Ok(Algorithm::Lz77),
            _ => Err(CodecError::Config(format!(
                "Unknown algorithm: {s}. Use: rle, lz77"
            ))),
        }
    }
}

/// Result of compression operation
#[derive(Debug, Clone)]
pub struct CompressionResult {
    /// Framed artifact (header + payload)
    pub data: Vec<u8>,
    /// Algorithm used
    pub algorithm: Algorithm,
    /// Original size in bytes
    pub original_bytes: usize,
    /// Framed size in bytes
    pub compressed_bytes: usize,
}

impl CompressionResult {
    /// Create new compression result
    pub fn new(data: Vec<u8>, algorithm: Algorithm, original_bytes: usize) -> Self {
        let compressed_bytes = data.len();
        Self {
            data,
            algorithm,
            original_bytes,
            compressed_bytes,
        }
    }

    /// Calculate byte compression ratio (original / compressed)
    pub fn byte_ratio(&self) -> f64 {
        if self.compressed_bytes == 0 {
            0.0
        } else {
            self.original_bytes as f64 / self.compressed_bytes as f64
        }
    }

    /// Percentage of bytes saved; negative when the artifact grew
    pub fn savings_percent(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        (self.original_bytes as f64 - self.compressed_bytes as f64) / self.original_bytes as f64
            * 100.0
    }

    /// Check if compression was beneficial
    pub fn is_beneficial(&self) -> bool {
        self.compressed_bytes < self.original_bytes
    }
}
