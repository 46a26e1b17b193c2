//! Codec engine for automatic algorithm selection and compression.
//!
//! The engine classifies content, picks a codec, and frames the payload so
//! `decompress` can dispatch on the header alone.

use serde::Serialize;

use super::classify::{classify, count_runs, run_ratio, select_algorithm, Classification};
use super::lz77::Lz77Codec;
use super::rle::RleCodec;
use super::{Algorithm, CompressionResult};
use crate::config::CompressionConfig;
use crate::container;
use crate::error::Result;

/// Content characteristics for algorithm selection
#[derive(Debug, Clone, Serialize)]
pub struct ContentAnalysis {
    /// Content length in bytes
    pub length: usize,
    /// Coarse content category
    pub classification: Classification,
    /// Number of maximal same-byte runs
    pub run_count: usize,
    /// `run_count * 2 / length`
    pub run_ratio: f64,
    /// Codec the selector picks for this content
    pub recommended: Algorithm,
}

impl ContentAnalysis {
    /// Analyze content for compression characteristics
    pub fn analyze(data: &[u8]) -> Self {
        let classification = classify(data);
        Self {
            length: data.len(),
            classification,
            run_count: count_runs(data),
            run_ratio: run_ratio(data),
            recommended: select_algorithm(classification, data),
        }
    }
}

/// Codec engine with automatic algorithm selection
#[derive(Debug, Clone, Copy, Default)]
pub struct CodecEngine {
    /// RLE codec instance
    rle: RleCodec,
    /// LZ77 codec instance
    lz77: Lz77Codec,
}

impl CodecEngine {
    /// Create new codec engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine from configuration
    pub fn from_config(config: &CompressionConfig) -> Self {
        Self::new()
            .with_window_size(config.window_size)
            .with_max_match(config.max_match)
    }

    /// Set LZ77 window size
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.lz77 = self.lz77.with_window_size(window_size);
        self
    }

    /// Set LZ77 maximum match length
    pub fn with_max_match(mut self, max_match: usize) -> Self {
        self.lz77 = self.lz77.with_max_match(max_match);
        self
    }

    /// LZ77 codec in use
    pub fn lz77(&self) -> &Lz77Codec {
        &self.lz77
    }

    /// Encode a bare payload (no header)
    pub fn encode_payload(&self, data: &[u8], algorithm: Algorithm) -> Vec<u8> {
        match algorithm {
            Algorithm::Rle => self.rle.encode(data),
            Algorithm::Lz77 => self.lz77.compress(data),
        }
    }

    /// Compress with specified algorithm
    pub fn compress(&self, data: &[u8], algorithm: Algorithm) -> Result<CompressionResult> {
        let payload = self.encode_payload(data, algorithm);
        let framed = container::wrap(&payload, algorithm);

        tracing::debug!(
            algorithm = %algorithm,
            original = data.len(),
            compressed = framed.len(),
            "compressed"
        );

        Ok(CompressionResult::new(framed, algorithm, data.len()))
    }

    /// Compress with automatic algorithm selection
    pub fn compress_auto(&self, data: &[u8]) -> Result<(CompressionResult, Algorithm)> {
        let algorithm = self.select_algorithm(data);
        let result = self.compress(data, algorithm)?;
        Ok((result, algorithm))
    }

    /// Compress with a fixed algorithm, or auto-select when `None`
    pub fn compress_with(
        &self,
        data: &[u8],
        algorithm: Option<Algorithm>,
    ) -> Result<CompressionResult> {
        match algorithm {
            Some(algo) => self.compress(data, algo),
            None => self.compress_auto(data).map(|(result, _)| result),
        }
    }

    /// Try every algorithm and return the smallest artifact
    pub fn compress_best(&self, data: &[u8]) -> Result<CompressionResult> {
        let rle = self.compress(data, Algorithm::Rle)?;
        let lz77 = self.compress(data, Algorithm::Lz77)?;

        // Ties go to RLE.
        if lz77.compressed_bytes < rle.compressed_bytes {
            Ok(lz77)
        } else {
            Ok(rle)
        }
    }

    /// Select algorithm from content
    pub fn select_algorithm(&self, data: &[u8]) -> Algorithm {
        let classification = classify(data);
        let algorithm = select_algorithm(classification, data);
        tracing::debug!(%classification, %algorithm, len = data.len(), "selected algorithm");
        algorithm
    }

    /// Decompress a framed artifact (algorithm read from the header)
    pub fn decompress(&self, framed: &[u8]) -> Result<Vec<u8>> {
        let (algorithm, payload) = container::unwrap(framed)?;
        tracing::debug!(%algorithm, payload = payload.len(), "decompressing");
        self.decompress_raw(payload, algorithm)
    }

    /// Decompress a bare payload with an explicit algorithm
    pub fn decompress_raw(&self, payload: &[u8], algorithm: Algorithm) -> Result<Vec<u8>> {
        match algorithm {
            Algorithm::Rle => self.rle.decode(payload),
            Algorithm::Lz77 => self.lz77.decompress(payload),
        }
    }

    /// Get analysis for content
    pub fn analyze(&self, data: &[u8]) -> ContentAnalysis {
        ContentAnalysis::analyze(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::HEADER_SIZE;
    use crate::error::CodecError;

    #[test]
    fn test_auto_select_text() {
        let engine = CodecEngine::new();
        let (result, algo) = engine.compress_auto(b"the quick brown fox, the quick brown fox").unwrap();
        assert_eq!(algo, Algorithm::Lz77);
        assert_eq!(result.data[6], Algorithm::Lz77.tag());
    }

    #[test]
    fn test_auto_select_image() {
        let engine = CodecEngine::new();
        let mut png = b"\x89PNG\r\n\x1a\n".to_vec();
        png.extend(std::iter::repeat(0u8).take(64));
        let (_, algo) = engine.compress_auto(&png).unwrap();
        assert_eq!(algo, Algorithm::Rle);
    }

    #[test]
    fn test_compress_decompress_each_algorithm() {
        let engine = CodecEngine::new();
        let content = b"AAABBBCCCCCDDDDE\x00\x00\x01\x02abcabcabc";
        for &algo in Algorithm::all() {
            let result = engine.compress(content, algo).unwrap();
            assert_eq!(result.algorithm, algo);
            assert_eq!(engine.decompress(&result.data).unwrap(), content);
        }
    }

    #[test]
    fn test_empty_input() {
        let engine = CodecEngine::new();
        for &algo in Algorithm::all() {
            let result = engine.compress(b"", algo).unwrap();
            assert_eq!(result.data.len(), HEADER_SIZE);
            assert!(engine.decompress(&result.data).unwrap().is_empty());
        }
    }

    #[test]
    fn test_decompress_raw() {
        let engine = CodecEngine::new();
        let payload = engine.encode_payload(b"zzzzzz", Algorithm::Rle);
        assert_eq!(payload, vec![6, b'z']);
        assert_eq!(engine.decompress_raw(&payload, Algorithm::Rle).unwrap(), b"zzzzzz");
    }

    #[test]
    fn test_corrupted_header_never_decodes() {
        let engine = CodecEngine::new();
        let mut framed = engine.compress(b"hello", Algorithm::Rle).unwrap().data;
        framed[0] ^= 0xFF;
        assert!(matches!(
            engine.decompress(&framed),
            Err(CodecError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_compress_best() {
        let engine = CodecEngine::new();
        let content = vec![0u8; 2000];
        let best = engine.compress_best(&content).unwrap();
        for &algo in Algorithm::all() {
            let other = engine.compress(&content, algo).unwrap();
            assert!(best.compressed_bytes <= other.compressed_bytes);
        }
        assert_eq!(engine.decompress(&best.data).unwrap(), content);
    }

    #[test]
    fn test_content_analysis() {
        let analysis = ContentAnalysis::analyze(&[0, 0, 0, 1, 1, 2]);
        assert_eq!(analysis.length, 6);
        assert_eq!(analysis.classification, Classification::Binary);
        assert_eq!(analysis.run_count, 3);
        assert!((analysis.run_ratio - 1.0).abs() < f64::EPSILON);
        assert_eq!(analysis.recommended, Algorithm::Rle);
    }

    #[test]
    fn test_from_config() {
        let config = CompressionConfig {
            window_size: 32,
            max_match: 16,
            ..Default::default()
        };
        let engine = CodecEngine::from_config(&config);
        assert_eq!(engine.lz77().window_size(), 32);
        assert_eq!(engine.lz77().max_match(), 16);
    }
}
