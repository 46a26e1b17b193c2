//! # rscmp - Small Byte-Stream Compressor
//!
//! Two codecs, a heuristic that picks between them, and a container format
//! that records the choice so artifacts decode without extra hints.
//!
//! ## Features
//!
//! - **RLE**: `(count, byte)` runs, lossless for any byte value
//! - **LZ77**: bounded-window back-references with self-overlapping copies
//! - **Auto-selection**: classify content as text/image/binary and pick a codec
//! - **Self-describing container**: 8-byte header with magic, version, and tag
//!
//! ### Pipeline
//!
//! ```text
//! compress:   bytes -> classify -> select -> encode -> wrap   -> artifact
//! decompress: artifact -> unwrap (magic, version, tag) -> decode -> bytes
//! ```
//!
//! ### Container
//!
//! | Offset | Size | Field     | Value                |
//! |--------|------|-----------|----------------------|
//! | 0      | 5    | magic     | `RSCMP`              |
//! | 5      | 1    | version   | `2`                  |
//! | 6      | 1    | algorithm | `1` = RLE, `2` = LZ77|
//! | 7      | 1    | reserved  | `0`                  |
//! | 8      | N    | payload   | codec output         |
//!
//! ## Quick Start
//!
//! ```rust
//! use rscmp::{compress, decompress, Algorithm};
//!
//! // Auto-select
//! let artifact = compress(b"AAAAAAAABBBBBBBB", None).unwrap();
//! assert_eq!(decompress(&artifact).unwrap(), b"AAAAAAAABBBBBBBB");
//!
//! // Fixed algorithm
//! let artifact = compress(b"\x00\x00\x00\x00", Some(Algorithm::Rle)).unwrap();
//! assert_eq!(artifact.len(), 8 + 2);
//! ```
//!
//! All core operations are pure and stateless, so independent inputs can be
//! processed on separate threads without coordination.
//!
//! ## Modules
//!
//! - [`codec`]: RLE and LZ77 codecs, classifier, selector, engine
//! - [`container`]: Header framing
//! - [`batch`]: Per-file compression with independent failure records
//! - [`config`]: Configuration management
//! - [`error`]: Error types and result aliases

pub mod batch;
pub mod codec;
pub mod config;
pub mod container;
pub mod error;

// Re-exports for convenience
pub use codec::{
    classify, select_algorithm, Algorithm, Classification, CodecEngine, CompressionResult,
    ContentAnalysis,
};
pub use config::Config;
pub use error::{CodecError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compress with a fixed algorithm, or auto-select when `None`
pub fn compress(data: &[u8], algorithm: Option<Algorithm>) -> Result<Vec<u8>> {
    CodecEngine::new()
        .compress_with(data, algorithm)
        .map(|result| result.data)
}

/// Decompress a framed artifact
pub fn decompress(framed: &[u8]) -> Result<Vec<u8>> {
    CodecEngine::new().decompress(framed)
}

/// Check if bytes look like an rscmp artifact
pub fn is_rscmp_format(data: &[u8]) -> bool {
    container::is_container_format(data)
}
