//! Self-describing container for codec payloads.
//!
//! # Layout
//!
//! ```text
//! [magic: 5]     "RSCMP"
//! [version: 1]   FORMAT_VERSION
//! [algorithm: 1] 1 = RLE, 2 = LZ77
//! [reserved: 1]  written as 0, ignored on read
//! [payload: N]   run stream or serialized token stream
//! ```
//!
//! # Example
//!
//! ```rust
//! use rscmp::codec::Algorithm;
//! use rscmp::container::{unwrap, wrap};
//!
//! let framed = wrap(b"\x03A", Algorithm::Rle);
//! let (algorithm, payload) = unwrap(&framed).unwrap();
//! assert_eq!(algorithm, Algorithm::Rle);
//! assert_eq!(payload, b"\x03A");
//! ```

mod header;

pub use header::ContainerHeader;

use crate::codec::Algorithm;
use crate::error::Result;

/// Magic constant at the start of every artifact
pub const MAGIC: &[u8; 5] = b"RSCMP";

/// Container format version.
///
/// Version 1 used a 17-byte LZ77 token with a zero-byte "no literal"
/// sentinel; version 2 carries an explicit presence flag.
pub const FORMAT_VERSION: u8 = 2;

/// Header size in bytes
pub const HEADER_SIZE: usize = 8;

/// Prepend a container header to `payload`
pub fn wrap(payload: &[u8], algorithm: Algorithm) -> Vec<u8> {
    let mut framed = Vec::with_capacity(HEADER_SIZE + payload.len());
    framed.extend_from_slice(&ContainerHeader::new(algorithm).to_bytes());
    framed.extend_from_slice(payload);
    framed
}

/// Validate the header and split off the payload, unmodified
pub fn unwrap(framed: &[u8]) -> Result<(Algorithm, &[u8])> {
    let header = ContainerHeader::from_bytes(framed)?;
    Ok((header.algorithm, &framed[HEADER_SIZE..]))
}

/// Check if bytes start with the container magic
pub fn is_container_format(data: &[u8]) -> bool {
    data.starts_with(MAGIC)
}
