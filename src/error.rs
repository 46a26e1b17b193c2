//! rscmp error types.
//!
//! Every core operation is total over well-formed input and reports malformed
//! input through a specific [`CodecError`] variant. The core never retries or
//! silently recovers; the caller decides what a failure means for its batch.

use thiserror::Error;

/// rscmp errors.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Container magic or version did not match, or the buffer is too short
    /// to hold a header. The payload is never inspected.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Header parsed but the algorithm tag is not a known codec.
    #[error("Unsupported algorithm tag: {0}")]
    UnsupportedAlgorithmTag(u8),

    /// RLE payload length is not a multiple of the 2-byte run stride.
    #[error("Truncated run: payload of {len} bytes is not a whole number of runs")]
    TruncatedRun {
        /// Payload length in bytes.
        len: usize,
    },

    /// RLE payload contains a run with a zero count.
    #[error("Zero-length run at run {index}")]
    ZeroLengthRun {
        /// Index of the offending run.
        index: usize,
    },

    /// LZ77 payload length is not a multiple of the token stride.
    #[error("Truncated token: payload of {len} bytes is not a whole number of tokens")]
    TruncatedToken {
        /// Payload length in bytes.
        len: usize,
    },

    /// A serialized LZ77 token carries out-of-range fields.
    #[error("Malformed token {index}: {reason}")]
    MalformedToken {
        /// Index of the offending token.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// An LZ77 token references output that has not been produced yet.
    #[error("Dangling reference in token {index}: offset {offset} with only {available} bytes produced")]
    DanglingReference {
        /// Index of the offending token.
        index: usize,
        /// Backward offset carried by the token.
        offset: usize,
        /// Output bytes materialized before the token.
        available: usize,
    },

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for rscmp operations
pub type Result<T> = std::result::Result<T, CodecError>;

impl From<toml::de::Error> for CodecError {
    fn from(err: toml::de::Error) -> Self {
        CodecError::Config(format!("Failed to parse config: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CodecError::DanglingReference {
            index: 3,
            offset: 9,
            available: 4,
        };
        assert_eq!(
            err.to_string(),
            "Dangling reference in token 3: offset 9 with only 4 bytes produced"
        );

        let err = CodecError::UnsupportedAlgorithmTag(7);
        assert_eq!(err.to_string(), "Unsupported algorithm tag: 7");
    }

    #[test]
    fn test_toml_error_maps_to_config() {
        let err: CodecError = toml::from_str::<toml::Value>("= broken")
            .unwrap_err()
            .into();
        assert!(matches!(&err, CodecError::Config(msg) if msg.starts_with("Failed to parse config")));
    }
}
