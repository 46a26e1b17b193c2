//! Run-length codec (Algorithm::Rle).
//!
//! Each run is two bytes, `count` then `byte`, with `count` in `1..=255`.
//! Runs longer than 255 are split. Counts and values are independent bytes,
//! so any input (including digits and zero bytes) round-trips.

use crate::error::{CodecError, Result};

/// Bytes per encoded run
pub const RUN_STRIDE: usize = 2;

/// Longest run a single pair can describe
pub const MAX_RUN: u8 = u8::MAX;

/// RLE codec
#[derive(Debug, Clone, Copy, Default)]
pub struct RleCodec;

impl RleCodec {
    /// Create new RLE codec
    pub fn new() -> Self {
        Self
    }

    /// Encode bytes as a run stream
    pub fn encode(&self, input: &[u8]) -> Vec<u8> {
        let Some((&first, rest)) = input.split_first() else {
            return Vec::new();
        };

        let mut encoded = Vec::with_capacity(RUN_STRIDE * 8);
        let mut current = first;
        let mut count = 1u8;

        for &byte in rest {
            if byte == current && count < MAX_RUN {
                count += 1;
            } else {
                encoded.push(count);
                encoded.push(current);
                current = byte;
                count = 1;
            }
        }

        encoded.push(count);
        encoded.push(current);
        encoded
    }

    /// Decode a run stream back to bytes
    pub fn decode(&self, encoded: &[u8]) -> Result<Vec<u8>> {
        if encoded.len() % RUN_STRIDE != 0 {
            return Err(CodecError::TruncatedRun { len: encoded.len() });
        }

        let total: usize = encoded
            .chunks_exact(RUN_STRIDE)
            .map(|pair| pair[0] as usize)
            .sum();
        let mut decoded = Vec::with_capacity(total);

        for (index, pair) in encoded.chunks_exact(RUN_STRIDE).enumerate() {
            let (count, byte) = (pair[0], pair[1]);
            if count == 0 {
                return Err(CodecError::ZeroLengthRun { index });
            }
            decoded.resize(decoded.len() + count as usize, byte);
        }

        Ok(decoded)
    }
}
