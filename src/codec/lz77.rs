//! Windowed LZ77 codec (Algorithm::Lz77).
//!
//! The encoder scans every candidate start in the bounded backward window and
//! keeps the longest match. A match may run past the current position
//! (self-overlap); the decoder reproduces that by copying byte-by-byte from
//! the growing output.
//!
//! The search is linear in the window size per position. A larger window
//! would want a hash chain over 3-byte prefixes; only `find_longest_match`
//! changes in that case, not the token format.

use super::token::{deserialize_tokens, serialize_tokens, Token};
use crate::error::{CodecError, Result};

/// Default backward window in bytes
pub const DEFAULT_WINDOW_SIZE: usize = 10;

/// Longest copy a single token can describe
pub const MAX_MATCH_LENGTH: usize = u8::MAX as usize;

/// LZ77 codec
#[derive(Debug, Clone, Copy)]
pub struct Lz77Codec {
    window_size: usize,
    max_match: usize,
}

impl Default for Lz77Codec {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            max_match: MAX_MATCH_LENGTH,
        }
    }
}

impl Lz77Codec {
    /// Create new LZ77 codec with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backward window size
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Set the maximum match length (capped at 255)
    pub fn with_max_match(mut self, max_match: usize) -> Self {
        self.max_match = max_match.min(MAX_MATCH_LENGTH);
        self
    }

    /// Backward window size in bytes
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Maximum match length
    pub fn max_match(&self) -> usize {
        self.max_match
    }

    /// Encode bytes to a token sequence
    pub fn encode(&self, input: &[u8]) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut pos = 0;

        while pos < input.len() {
            let (offset, length) = self.find_longest_match(input, pos);

            if length == 0 {
                tokens.push(Token::literal(input[pos]));
                pos += 1;
                continue;
            }

            let literal = input.get(pos + length).copied();
            // length <= max_match <= 255
            tokens.push(Token::copy(offset, length as u8, literal));
            pos += length + usize::from(literal.is_some());
        }

        tokens
    }

    /// Longest match for `pos` within the window, as `(offset, length)`
    fn find_longest_match(&self, input: &[u8], pos: usize) -> (usize, usize) {
        let start = pos.saturating_sub(self.window_size);
        let limit = (input.len() - pos).min(self.max_match);
        let ahead = &input[pos..pos + limit];

        let mut best_offset = 0;
        let mut best_length = 0;

        for candidate in start..pos {
            let length = input[candidate..]
                .iter()
                .zip(ahead)
                .take_while(|(a, b)| a == b)
                .count();

            if length > best_length {
                best_length = length;
                best_offset = pos - candidate;
                if best_length == limit {
                    break;
                }
            }
        }

        (best_offset, best_length)
    }

    /// Decode a token sequence back to bytes
    pub fn decode(&self, tokens: &[Token]) -> Result<Vec<u8>> {
        let mut output: Vec<u8> = Vec::new();

        for (index, token) in tokens.iter().enumerate() {
            let length = usize::from(token.length);
            let available = output.len();

            if token.offset > available || (length > 0 && token.offset == 0) {
                return Err(CodecError::DanglingReference {
                    index,
                    offset: token.offset,
                    available,
                });
            }

            if length > 0 {
                let start = available - token.offset;
                output.reserve(length + 1);
                // Index into the live buffer so overlapping copies see fresh bytes.
                for i in 0..length {
                    let byte = output[start + i];
                    output.push(byte);
                }
            }

            if let Some(byte) = token.literal {
                output.push(byte);
            }
        }

        Ok(output)
    }

    /// Encode and serialize in one step
    pub fn compress(&self, input: &[u8]) -> Vec<u8> {
        serialize_tokens(&self.encode(input))
    }

    /// Deserialize and decode in one step
    pub fn decompress(&self, payload: &[u8]) -> Result<Vec<u8>> {
        let tokens = deserialize_tokens(payload)?;
        self.decode(&tokens)
    }
}
