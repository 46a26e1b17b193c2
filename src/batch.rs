//! Per-file compression over a list of paths.
//!
//! Each input runs its own read → compress → write pipeline. A failure is
//! recorded against that input and the batch moves on unless
//! `continue_on_error` is off.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::codec::{Algorithm, CodecEngine};
use crate::config::Config;
use crate::error::Result;

/// Batch options
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory for outputs; defaults to each input's own directory
    pub output_dir: Option<PathBuf>,
    /// Extension for compressed outputs (without the dot)
    pub extension: String,
    /// Keep going after a failed input
    pub continue_on_error: bool,
    /// Fixed algorithm, or `None` for auto-selection
    pub algorithm: Option<Algorithm>,
    /// Try every algorithm and keep the smallest artifact
    pub best: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl BatchOptions {
    /// Options from configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            output_dir: None,
            extension: config.batch.extension.clone(),
            continue_on_error: config.batch.continue_on_error,
            algorithm: config.compression.algorithm.fixed(),
            best: false,
        }
    }

    /// Write outputs into `dir`
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Use a fixed algorithm (or `None` for auto)
    pub fn with_algorithm(mut self, algorithm: Option<Algorithm>) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Keep the smallest artifact across all algorithms
    pub fn with_best(mut self, best: bool) -> Self {
        self.best = best;
        self
    }

    fn target_dir<'a>(&'a self, input: &'a Path) -> &'a Path {
        match &self.output_dir {
            Some(dir) => dir.as_path(),
            None => input.parent().unwrap_or_else(|| Path::new("")),
        }
    }

    /// Output path for compressing `input`
    pub fn compressed_path(&self, input: &Path) -> PathBuf {
        let mut name = input.file_name().unwrap_or_default().to_os_string();
        name.push(".");
        name.push(&self.extension);
        self.target_dir(input).join(name)
    }

    /// Output path for decompressing `input`
    pub fn decompressed_path(&self, input: &Path) -> PathBuf {
        let name = input.file_name().unwrap_or_default().to_string_lossy();
        let suffix = format!(".{}", self.extension);
        let stem = match name.strip_suffix(&suffix) {
            Some(stem) if !stem.is_empty() => stem.to_string(),
            _ => format!("{name}.out"),
        };
        self.target_dir(input).join(stem)
    }
}

/// Outcome for one input
#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    /// Input path
    pub input: PathBuf,
    /// Output path (set on success)
    pub output: Option<PathBuf>,
    /// Algorithm used
    pub algorithm: Option<Algorithm>,
    /// Bytes read
    pub input_bytes: usize,
    /// Bytes written
    pub output_bytes: usize,
    /// Failure description
    pub error: Option<String>,
}

impl BatchEntry {
    fn failed(input: &Path, input_bytes: usize, error: String) -> Self {
        Self {
            input: input.to_path_buf(),
            output: None,
            algorithm: None,
            input_bytes,
            output_bytes: 0,
            error: Some(error),
        }
    }

    /// Check if this input succeeded
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-input results of a batch
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// One entry per processed input, in input order
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    /// Successful entries
    pub fn succeeded(&self) -> impl Iterator<Item = &BatchEntry> {
        self.entries.iter().filter(|e| e.is_ok())
    }

    /// Failed entries
    pub fn failed(&self) -> impl Iterator<Item = &BatchEntry> {
        self.entries.iter().filter(|e| !e.is_ok())
    }

    /// Check if every processed input succeeded
    pub fn is_success(&self) -> bool {
        self.entries.iter().all(BatchEntry::is_ok)
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Compress,
    Decompress,
}

/// Compress each input into its own artifact
pub fn compress_files(
    engine: &CodecEngine,
    inputs: &[PathBuf],
    options: &BatchOptions,
) -> Result<BatchReport> {
    run(engine, inputs, options, Direction::Compress)
}

/// Decompress each artifact back to its original bytes
pub fn decompress_files(
    engine: &CodecEngine,
    inputs: &[PathBuf],
    options: &BatchOptions,
) -> Result<BatchReport> {
    run(engine, inputs, options, Direction::Decompress)
}

fn run(
    engine: &CodecEngine,
    inputs: &[PathBuf],
    options: &BatchOptions,
    direction: Direction,
) -> Result<BatchReport> {
    if let Some(dir) = &options.output_dir {
        std::fs::create_dir_all(dir)?;
    }

    let mut report = BatchReport::default();
    let mut written = HashSet::new();
    for input in inputs {
        let entry = process_one(engine, input, options, direction, &mut written);
        let stop = !entry.is_ok() && !options.continue_on_error;
        report.entries.push(entry);
        if stop {
            tracing::warn!("Stopping batch after failure on {}", input.display());
            break;
        }
    }

    tracing::info!(
        processed = report.entries.len(),
        failed = report.failed().count(),
        "batch finished"
    );
    Ok(report)
}

fn process_one(
    engine: &CodecEngine,
    input: &Path,
    options: &BatchOptions,
    direction: Direction,
    written: &mut HashSet<PathBuf>,
) -> BatchEntry {
    let output_path = match direction {
        Direction::Compress => options.compressed_path(input),
        Direction::Decompress => options.decompressed_path(input),
    };
    // Two inputs with the same file name collide once they share an output dir.
    if written.contains(&output_path) {
        tracing::warn!(
            "Skipping {}: {} was already written in this batch",
            input.display(),
            output_path.display()
        );
        return BatchEntry::failed(
            input,
            0,
            format!("output {} already written by an earlier input", output_path.display()),
        );
    }

    let data = match std::fs::read(input) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!("Failed to read {}: {e}", input.display());
            return BatchEntry::failed(input, 0, format!("read failed: {e}"));
        },
    };

    let (output, algorithm) = match direction {
        Direction::Compress => {
            let compressed = if options.best {
                engine.compress_best(&data)
            } else {
                engine.compress_with(&data, options.algorithm)
            };
            match compressed {
                Ok(result) => (result.data, result.algorithm),
                Err(e) => return BatchEntry::failed(input, data.len(), e.to_string()),
            }
        },
        Direction::Decompress => {
            let decoded = crate::container::unwrap(&data)
                .and_then(|(algo, payload)| Ok((algo, engine.decompress_raw(payload, algo)?)));
            match decoded {
                Ok((algo, bytes)) => (bytes, algo),
                Err(e) => {
                    tracing::warn!("Failed to decompress {}: {e}", input.display());
                    return BatchEntry::failed(input, data.len(), e.to_string());
                },
            }
        },
    };

    if let Err(e) = std::fs::write(&output_path, &output) {
        tracing::warn!("Failed to write {}: {e}", output_path.display());
        return BatchEntry::failed(input, data.len(), format!("write failed: {e}"));
    }
    written.insert(output_path.clone());

    tracing::debug!(
        input = %input.display(),
        output = %output_path.display(),
        %algorithm,
        "processed"
    );

    BatchEntry {
        input: input.to_path_buf(),
        output: Some(output_path),
        algorithm: Some(algorithm),
        input_bytes: data.len(),
        output_bytes: output.len(),
        error: None,
    }
}
