//! Fixed container header.

use super::{FORMAT_VERSION, HEADER_SIZE, MAGIC};
use crate::codec::Algorithm;
use crate::error::{CodecError, Result};

/// Container header (8 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    /// Format version
    pub version: u8,
    /// Codec that produced the payload
    pub algorithm: Algorithm,
    /// Reserved byte as read; always written as zero
    pub reserved: u8,
}

impl ContainerHeader {
    /// Header for the current format version
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            version: FORMAT_VERSION,
            algorithm,
            reserved: 0,
        }
    }

    /// Encode to bytes
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..5].copy_from_slice(MAGIC);
        bytes[5] = self.version;
        bytes[6] = self.algorithm.tag();
        // bytes[7] stays zero (reserved)
        bytes
    }

    /// Decode from bytes
    ///
    /// Magic and version are checked before the tag, and nothing past the
    /// header is read.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(CodecError::InvalidHeader(format!(
                "header too short: {} < {}",
                bytes.len(),
                HEADER_SIZE
            )));
        }

        if &bytes[0..5] != MAGIC {
            return Err(CodecError::InvalidHeader("bad magic number".to_string()));
        }

        let version = bytes[5];
        if version != FORMAT_VERSION {
            return Err(CodecError::InvalidHeader(format!(
                "unsupported version {version} (expected {FORMAT_VERSION})"
            )));
        }

        let algorithm = Algorithm::from_tag(bytes[6])?;

        Ok(Self {
            version,
            algorithm,
            reserved: bytes[7],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let bytes = ContainerHeader::new(Algorithm::Lz77).to_bytes();
        assert_eq!(&bytes, b"RSCMP\x02\x02\x00");
    }

    #[test]
    fn test_header_roundtrip() {
        for &algo in Algorithm::all() {
            let header = ContainerHeader::new(algo);
            let decoded = ContainerHeader::from_bytes(&header.to_bytes()).unwrap();
            assert_eq!(header, decoded);
        }
    }

    #[test]
    fn test_reserved_ignored_on_read() {
        let mut bytes = ContainerHeader::new(Algorithm::Rle).to_bytes();
        bytes[7] = 0xAB;
        let decoded = ContainerHeader::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.algorithm, Algorithm::Rle);
        assert_eq!(decoded.reserved, 0xAB);
    }

    #[test]
    fn test_version_mismatch() {
        let mut bytes = ContainerHeader::new(Algorithm::Rle).to_bytes();
        bytes[5] = 1;
        assert!(matches!(
            ContainerHeader::from_bytes(&bytes),
            Err(CodecError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_bad_tag() {
        let mut bytes = ContainerHeader::new(Algorithm::Rle).to_bytes();
        bytes[6] = 9;
        assert!(matches!(
            ContainerHeader::from_bytes(&bytes),
            Err(CodecError::UnsupportedAlgorithmTag(9))
        ));
    }
}
