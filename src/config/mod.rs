//! Configuration management.
//!
//! Supports configuration from:
//! - TOML config files (`~/.config/rscmp/config.toml` by default)
//! - Environment variables (`RSCMP_*`)
//! - CLI arguments (applied by the binary on top of both)

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec::lz77::{DEFAULT_WINDOW_SIZE, MAX_MATCH_LENGTH};
use crate::codec::Algorithm;
use crate::error::{CodecError, Result};

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Codec configuration
    #[serde(default)]
    pub compression: CompressionConfig,

    /// Batch processing configuration
    #[serde(default)]
    pub batch: BatchConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            CodecError::Config(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `RSCMP_*` environment overrides on top of this config
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(val) = env_parse::<usize>("RSCMP_WINDOW_SIZE") {
            self.compression.window_size = val;
        }
        if let Some(val) = env_parse::<usize>("RSCMP_MAX_MATCH") {
            self.compression.max_match = val;
        }
        if let Some(val) = env_parse::<AlgorithmSetting>("RSCMP_ALGORITHM") {
            self.compression.algorithm = val;
        }
        self
    }

    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rscmp").join("config.toml"))
    }

    /// Resolve configuration: explicit file, else the default file if it
    /// exists, else defaults; environment overrides apply last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(path)?,
                None => Self::default(),
            },
        };
        Ok(base.with_env_overrides())
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(val) => Some(val),
        Err(_) => {
            tracing::warn!("Ignoring {key}={raw}: not a valid value");
            None
        },
    }
}

/// Algorithm choice as written in config and on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmSetting {
    /// Classify the input and pick a codec
    #[default]
    Auto,
    /// Always RLE
    Rle,
    /// Always LZ77
    #[serde(alias = "lz")]
    Lz77,
}

impl AlgorithmSetting {
    /// Fixed algorithm, or `None` for auto-selection
    pub fn fixed(&self) -> Option<Algorithm> {
        match self {
            AlgorithmSetting::Auto => None,
            AlgorithmSetting::Rle => Some(Algorithm::Rle),
            AlgorithmSetting::Lz77 => Some(Algorithm::Lz77),
        }
    }
}

impl FromStr for AlgorithmSetting {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("auto") || s.eq_ignore_ascii_case("a") {
            return Ok(AlgorithmSetting::Auto);
        }
        match s.parse::<Algorithm>() {
            Ok(Algorithm::Rle) => Ok(AlgorithmSetting::Rle),
            Ok(Algorithm::Lz77) => Ok(AlgorithmSetting::Lz77),
            Err(_) => Err(CodecError::Config(format!(
                "Unknown algorithm: {s}. Use: auto, rle, lz77"
            ))),
        }
    }
}

impl std::fmt::Display for AlgorithmSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.fixed() {
            Some(algo) => write!(f, "{algo}"),
            None => write!(f, "AUTO"),
        }
    }
}

/// Codec configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    /// LZ77 backward window in bytes
    pub window_size: usize,

    /// LZ77 maximum match length (capped at 255)
    pub max_match: usize,

    /// Default algorithm for `compress`
    pub algorithm: AlgorithmSetting,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            max_match: MAX_MATCH_LENGTH,
            algorithm: AlgorithmSetting::Auto,
        }
    }
}

/// Batch processing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Extension appended to compressed outputs (without the dot)
    pub extension: String,

    /// Keep going after a failed input
    pub continue_on_error: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            extension: "rscmp".to_string(),
            continue_on_error: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.compression.window_size, 10);
        assert_eq!(config.compression.max_match, 255);
        assert_eq!(config.compression.algorithm, AlgorithmSetting::Auto);
        assert_eq!(config.batch.extension, "rscmp");
        assert!(config.batch.continue_on_error);
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            [compression]
            window_size = 64
            algorithm = "lz"

            [batch]
            extension = "cmp"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.compression.window_size, 64);
        assert_eq!(config.compression.max_match, 255);
        assert_eq!(config.compression.algorithm, AlgorithmSetting::Lz77);
        assert_eq!(config.batch.extension, "cmp");
        assert!(config.batch.continue_on_error);
    }

    #[test]
    fn test_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[compression]\nalgorithm = \"rle\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.compression.algorithm, AlgorithmSetting::Rle);

        assert!(matches!(
            Config::from_file(dir.path().join("missing.toml")),
            Err(CodecError::Config(_))
        ));
    }

    #[test]
    fn test_config_file_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[compression]\nwindow_size = \"wide\"\n").unwrap();

        match Config::from_file(&path) {
            Err(CodecError::Config(msg)) => assert!(msg.starts_with("Failed to parse config")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_algorithm_setting_parse() {
        assert_eq!("auto".parse::<AlgorithmSetting>().unwrap(), AlgorithmSetting::Auto);
        assert_eq!("RLE".parse::<AlgorithmSetting>().unwrap(), AlgorithmSetting::Rle);
        assert_eq!("lz77".parse::<AlgorithmSetting>().unwrap(), AlgorithmSetting::Lz77);
        assert!("zstd".parse::<AlgorithmSetting>().is_err());

        assert_eq!(AlgorithmSetting::Auto.fixed(), None);
        assert_eq!(AlgorithmSetting::Rle.fixed(), Some(Algorithm::Rle));
    }
}
