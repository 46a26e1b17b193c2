//! rscmp CLI binary.
//!
//! # Commands
//!
//! - `compress` - Compress one input, or a batch of files
//! - `decompress` - Decompress rscmp artifacts (or bare payloads with `--raw`)
//! - `analyze` - Show classification and the codec auto-selection would pick

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use rscmp::{
    batch::{self, BatchOptions, BatchReport},
    codec::{Algorithm, CodecEngine},
    config::AlgorithmSetting,
    is_rscmp_format, Config, VERSION,
};

#[derive(Parser)]
#[command(name = "rscmp")]
#[command(version = VERSION)]
#[command(about = "rscmp - RLE and LZ77 byte-stream compressor", long_about = None)]
struct Cli {
    /// Config file (default: ~/.config/rscmp/config.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress to the rscmp container format
    Compress {
        /// Input files (or - for stdin)
        inputs: Vec<PathBuf>,

        /// Output file path (default: stdout; single input only)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output directory for batch mode
        #[arg(short = 'd', long)]
        output_dir: Option<PathBuf>,

        /// Compression algorithm (auto, rle, lz77)
        #[arg(short, long)]
        algorithm: Option<AlgorithmSetting>,

        /// LZ77 window size in bytes
        #[arg(short, long)]
        window: Option<usize>,

        /// Try every algorithm and keep the smallest artifact
        #[arg(long, conflicts_with = "algorithm")]
        best: bool,

        /// Show compression statistics (single input; batch mode always reports sizes)
        #[arg(short, long)]
        stats: bool,
    },

    /// Decompress rscmp artifacts
    Decompress {
        /// Input files (or - for stdin)
        inputs: Vec<PathBuf>,

        /// Output file path (default: stdout; single input only)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output directory for batch mode
        #[arg(short = 'd', long)]
        output_dir: Option<PathBuf>,

        /// Treat input as a bare payload of this algorithm (no header)
        #[arg(long)]
        raw: Option<Algorithm>,
    },

    /// Analyze content for compression
    Analyze {
        /// Input file (or - for stdin)
        input: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Compress {
            inputs,
            output,
            output_dir,
            algorithm,
            window,
            best,
            stats,
        } => {
            let mut config = config;
            if let Some(algorithm) = algorithm {
                config.compression.algorithm = algorithm;
            }
            if let Some(window) = window {
                config.compression.window_size = window;
            }
            cmd_compress(&config, &inputs, output, output_dir, best, stats)
        },

        Commands::Decompress {
            inputs,
            output,
            output_dir,
            raw,
        } => cmd_decompress(&config, &inputs, output, output_dir, raw),

        Commands::Analyze { input, json } => cmd_analyze(&config, input, json),
    }
}

fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn is_batch(inputs: &[PathBuf], output_dir: Option<&PathBuf>) -> bool {
    inputs.len() > 1 || output_dir.is_some()
}

fn cmd_compress(
    config: &Config,
    inputs: &[PathBuf],
    output: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    best: bool,
    stats: bool,
) -> anyhow::Result<()> {
    let engine = CodecEngine::from_config(&config.compression);
    let algorithm = config.compression.algorithm.fixed();

    if is_batch(inputs, output_dir.as_ref()) {
        anyhow::ensure!(output.is_none(), "--output takes a single input; use --output-dir");
        let mut options = BatchOptions::from_config(config)
            .with_algorithm(algorithm)
            .with_best(best);
        options.output_dir = output_dir;
        let report = batch::compress_files(&engine, inputs, &options)?;
        return print_report(&report);
    }

    let content = read_input(inputs.first())?;
    let result = if best {
        engine.compress_best(&content)?
    } else {
        engine.compress_with(&content, algorithm)?
    };

    write_output(output.as_deref(), &result.data)?;

    if stats {
        eprintln!();
        eprintln!("Compression Statistics:");
        eprintln!("  Algorithm:    {}", result.algorithm);
        eprintln!("  Original:     {} bytes", result.original_bytes);
        eprintln!("  Compressed:   {} bytes", result.compressed_bytes);
        eprintln!("  Ratio:        {:.2}x", result.byte_ratio());
        eprintln!(
            "  Saved:        {} bytes ({:.1}%)",
            result.original_bytes as i64 - result.compressed_bytes as i64,
            result.savings_percent()
        );
    }

    Ok(())
}

fn cmd_decompress(
    config: &Config,
    inputs: &[PathBuf],
    output: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    raw: Option<Algorithm>,
) -> anyhow::Result<()> {
    let engine = CodecEngine::from_config(&config.compression);

    if is_batch(inputs, output_dir.as_ref()) {
        anyhow::ensure!(raw.is_none(), "--raw is not supported in batch mode");
        anyhow::ensure!(output.is_none(), "--output takes a single input; use --output-dir");
        let mut options = BatchOptions::from_config(config);
        options.output_dir = output_dir;
        let report = batch::decompress_files(&engine, inputs, &options)?;
        return print_report(&report);
    }

    let content = read_input(inputs.first())?;

    let decompressed = match raw {
        Some(algorithm) => engine.decompress_raw(&content, algorithm)?,
        None => {
            if !is_rscmp_format(&content) {
                tracing::warn!("Input does not appear to be in rscmp format");
            }
            engine.decompress(&content)?
        },
    };

    write_output(output.as_deref(), &decompressed)
}

fn cmd_analyze(config: &Config, input: Option<PathBuf>, json: bool) -> anyhow::Result<()> {
    let content = read_input(input.as_ref())?;
    let engine = CodecEngine::from_config(&config.compression);
    let analysis = engine.analyze(&content);

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    println!("Content Analysis:");
    println!("  Length:           {} bytes", analysis.length);
    println!("  Classification:   {}", analysis.classification);
    println!("  Runs:             {}", analysis.run_count);
    println!("  Run ratio:        {:.4}", analysis.run_ratio);
    println!();
    println!("Recommended Algorithm: {}", analysis.recommended);

    println!();
    println!("Algorithm Comparison:");
    for &algo in Algorithm::all() {
        let result = engine.compress(&content, algo)?;
        println!(
            "  {}: {} bytes -> {} bytes (ratio: {:.2}x)",
            algo,
            result.original_bytes,
            result.compressed_bytes,
            result.byte_ratio()
        );
    }

    Ok(())
}

fn print_report(report: &BatchReport) -> anyhow::Result<()> {
    for entry in &report.entries {
        match (&entry.error, &entry.output) {
            (None, Some(output)) => eprintln!(
                "  ok    {} -> {} ({}, {} -> {} bytes)",
                entry.input.display(),
                output.display(),
                entry.algorithm.map_or("-", |a| a.name()),
                entry.input_bytes,
                entry.output_bytes
            ),
            (Some(error), _) => eprintln!("  FAIL  {}: {error}", entry.input.display()),
            (None, None) => {},
        }
    }

    let failed = report.failed().count();
    eprintln!();
    eprintln!(
        "{} succeeded, {} failed",
        report.succeeded().count(),
        failed
    );

    anyhow::ensure!(failed == 0, "{failed} of {} inputs failed", report.entries.len());
    Ok(())
}

// Helper functions

fn read_input(input: Option<&PathBuf>) -> anyhow::Result<Vec<u8>> {
    match input {
        Some(path) if path.as_os_str() != "-" => {
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))
        },
        _ => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            Ok(buffer)
        },
    }
}

fn write_output(output: Option<&Path>, content: &[u8]) -> anyhow::Result<()> {
    if let Some(path) = output {
        std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
    } else {
        let mut stdout = io::stdout().lock();
        stdout.write_all(content)?;
        stdout.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_stats_help_mentions_batch() {
        let mut cli = Cli::command();
        let compress = cli.find_subcommand_mut("compress").unwrap();
        let stats = compress
            .get_arguments()
            .find(|arg| arg.get_id() == "stats")
            .unwrap();
        let help = stats.get_help().unwrap().to_string();
        assert!(help.contains("batch mode"));
    }

    #[test]
    fn test_best_accepted_in_batch() {
        let cli = Cli::try_parse_from(["rscmp", "compress", "a", "b", "--best", "-d", "out"]).unwrap();
        match cli.command {
            Commands::Compress { inputs, best, .. } => {
                assert_eq!(inputs.len(), 2);
                assert!(best);
            },
            _ => panic!("expected compress"),
        }
    }
}
