//! Codecs, content classification, and the engine that ties them together.
//!
//! # Algorithms
//!
//! | Algorithm   | Tag | Payload unit                         | Best For                    |
//! |-------------|-----|--------------------------------------|-----------------------------|
//! | [`Rle`]     | `1` | `(count, byte)`, 2 bytes             | Long same-byte runs, images |
//! | [`Lz77`]    | `2` | `(offset, length, literal)`, 18 bytes| Text, short repeats         |
//!
//! # Selection
//!
//! | Classification | Algorithm                                  |
//! |----------------|--------------------------------------------|
//! | Text           | LZ77                                       |
//! | Image          | RLE                                        |
//! | Binary         | RLE if `runs * 2 / len > 0.5`, else LZ77   |
//! | Unknown        | LZ77                                       |
//!
//! # Usage
//!
//! ```rust
//! use rscmp::codec::{Algorithm, CodecEngine};
//!
//! let engine = CodecEngine::new();
//! let (result, algorithm) = engine.compress_auto(b"hello hello hello").unwrap();
//! assert_eq!(algorithm, Algorithm::Lz77);
//!
//! let original = engine.decompress(&result.data).unwrap();
//! assert_eq!(original, b"hello hello hello");
//! ```
//!
//! [`Rle`]: Algorithm::Rle
//! [`Lz77`]: Algorithm::Lz77

mod algorithm;
pub mod classify;
mod engine;
pub mod lz77;
pub mod rle;
pub mod token;

pub use algorithm::{Algorithm, CompressionResult};
pub use classify::{classify, select_algorithm, Classification};
pub use engine::{CodecEngine, ContentAnalysis};
pub use lz77::Lz77Codec;
pub use rle::RleCodec;
pub use token::Token;
