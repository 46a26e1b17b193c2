//! LZ77 token type and its fixed-stride wire layout.
//!
//! # Wire Format
//!
//! ```text
//! [offset: 8]   u64 little-endian backward distance
//! [length: 8]   u64 little-endian copy length (0-255)
//! [flags: 1]    bit 0 = literal present, other bits zero
//! [literal: 1]  trailing literal byte (0 when absent)
//! ```
//!
//! The presence flag keeps a genuine `0x00` literal distinct from "no
//! literal", which a sentinel value cannot do.

use crate::error::{CodecError, Result};

/// Bytes per serialized token
pub const TOKEN_STRIDE: usize = 18;

/// Flag bit: the token carries a trailing literal
const FLAG_LITERAL: u8 = 0x01;

/// One LZ77 output unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Backward distance into already-produced output
    pub offset: usize,
    /// Number of bytes to copy
    pub length: u8,
    /// Byte appended after the copy, absent only at end of stream
    pub literal: Option<u8>,
}

impl Token {
    /// Literal-only token (no prior match)
    pub fn literal(byte: u8) -> Self {
        Self {
            offset: 0,
            length: 0,
            literal: Some(byte),
        }
    }

    /// Back-reference with an optional trailing literal
    pub fn copy(offset: usize, length: u8, literal: Option<u8>) -> Self {
        Self {
            offset,
            length,
            literal,
        }
    }

    /// Encode to bytes
    pub fn to_bytes(&self) -> [u8; TOKEN_STRIDE] {
        let mut bytes = [0u8; TOKEN_STRIDE];
        bytes[0..8].copy_from_slice(&(self.offset as u64).to_le_bytes());
        bytes[8..16].copy_from_slice(&u64::from(self.length).to_le_bytes());
        if let Some(byte) = self.literal {
            bytes[16] = FLAG_LITERAL;
            bytes[17] = byte;
        }
        bytes
    }

    /// Decode exactly one token; `index` is only used for error reporting
    pub fn from_bytes(index: usize, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != TOKEN_STRIDE {
            return Err(CodecError::TruncatedToken { len: bytes.len() });
        }

        let malformed = |reason: String| CodecError::MalformedToken { index, reason };

        let offset = usize::try_from(read_u64(&bytes[0..8]))
            .map_err(|_| malformed("offset does not fit in memory".to_string()))?;

        let raw_length = read_u64(&bytes[8..16]);
        let length = u8::try_from(raw_length)
            .map_err(|_| malformed(format!("length {raw_length} exceeds 255")))?;

        let flags = bytes[16];
        if flags & !FLAG_LITERAL != 0 {
            return Err(malformed(format!("unknown flag bits {flags:#04x}")));
        }
        let literal = (flags & FLAG_LITERAL != 0).then_some(bytes[17]);

        if length == 0 && literal.is_none() {
            return Err(malformed("token carries neither a copy nor a literal".to_string()));
        }

        Ok(Self {
            offset,
            length,
            literal,
        })
    }
}

fn read_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[..8]);
    u64::from_le_bytes(buf)
}

/// Serialize a token stream
pub fn serialize_tokens(tokens: &[Token]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(tokens.len() * TOKEN_STRIDE);
    for token in tokens {
        bytes.extend_from_slice(&token.to_bytes());
    }
    bytes
}

/// Deserialize a token stream
pub fn deserialize_tokens(data: &[u8]) -> Result<Vec<Token>> {
    if data.len() % TOKEN_STRIDE != 0 {
        return Err(CodecError::TruncatedToken { len: data.len() });
    }

    data.chunks_exact(TOKEN_STRIDE)
        .enumerate()
        .map(|(index, chunk)| Token::from_bytes(index, chunk))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_layout() {
        let bytes = Token::copy(3, 5, Some(b'x')).to_bytes();
        assert_eq!(&bytes[0..8], &[3, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&bytes[8..16], &[5, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(bytes[16], FLAG_LITERAL);
        assert_eq!(bytes[17], b'x');
    }

    #[test]
    fn test_zero_literal_distinct_from_absent() {
        let zero = Token::copy(1, 2, Some(0));
        let absent = Token::copy(1, 2, None);
        assert_ne!(zero.to_bytes(), absent.to_bytes());

        let decoded = deserialize_tokens(&serialize_tokens(&[zero, absent])).unwrap();
        assert_eq!(decoded, vec![zero, absent]);
    }

    #[test]
    fn test_truncated_stream() {
        let mut bytes = serialize_tokens(&[Token::literal(b'a'), Token::literal(b'b')]);
        bytes.pop();
        assert!(matches!(
            deserialize_tokens(&bytes),
            Err(CodecError::TruncatedToken { len: 35 })
        ));
    }

    #[test]
    fn test_length_out_of_range() {
        let mut bytes = Token::copy(1, 1, Some(b'a')).to_bytes();
        bytes[8..16].copy_from_slice(&256u64.to_le_bytes());
        assert!(matches!(
            Token::from_bytes(4, &bytes),
            Err(CodecError::MalformedToken { index: 4, .. })
        ));
    }

    #[test]
    fn test_unknown_flags() {
        let mut bytes = Token::literal(b'a').to_bytes();
        bytes[16] = 0x81;
        assert!(matches!(
            Token::from_bytes(0, &bytes),
            Err(CodecError::MalformedToken { .. })
        ));
    }

    #[test]
    fn test_from_bytes_requires_exact_stride() {
        let mut bytes = Token::literal(b'a').to_bytes().to_vec();
        assert!(matches!(
            Token::from_bytes(0, &bytes[..TOKEN_STRIDE - 1]),
            Err(CodecError::TruncatedToken { len: 17 })
        ));

        bytes.push(b'z');
        assert!(matches!(
            Token::from_bytes(0, &bytes),
            Err(CodecError::TruncatedToken { len: 19 })
        ));
    }

    #[test]
    fn test_empty_token_rejected() {
        let bytes = [0u8; TOKEN_STRIDE];
        assert!(matches!(
            Token::from_bytes(0, &bytes),
            Err(CodecError::MalformedToken { .. })
        ));
    }

    #[test]
    fn test_empty_stream() {
        assert!(serialize_tokens(&[]).is_empty());
        assert!(deserialize_tokens(&[]).unwrap().is_empty());
    }
}
