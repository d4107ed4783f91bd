//! Interferometer analysis command-line interface.
//!
//! Provides two workflows:
//! - `analyze`: batch power-ratio estimation over a directory of recordings.
//! - `generate`: synthetic fringe pattern, noise floor, and combined signal.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::warn;

use fringe_analysis::batch::{self, BatchConfig};
use fringe_analysis::filter::FilterSpec;
use fringe_analysis::generation::{
    DEFAULT_NOISE_LEVEL, DEFAULT_NUM_POINTS, combine, interference_pattern, noise_floor,
};

#[derive(Parser)]
#[command(name = "fringe")]
#[command(author, version, about = "Interferometer signal analysis", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the power ratio for every CSV recording in a directory
    ///
    /// A file that cannot be analyzed is logged and skipped; the batch
    /// continues with the rest. The exit status is non-zero only when no
    /// input file is found or every file fails.
    Analyze {
        /// Directory containing (Time, Signal) CSV recordings
        input_dir: PathBuf,

        /// Directory for the summary CSV (created if absent)
        output_dir: PathBuf,

        /// High-pass cutoff frequency in Hz
        #[arg(long, default_value_t = FilterSpec::DEFAULT_CUTOFF)]
        cutoff: f64,

        /// Sampling rate of the recordings in Hz
        #[arg(long, default_value_t = FilterSpec::DEFAULT_SAMPLING_RATE)]
        sampling_rate: f64,

        /// Butterworth filter order
        #[arg(long, default_value_t = FilterSpec::DEFAULT_ORDER)]
        order: usize,

        /// Relative measurement-error fraction (0.005 = 0.5%)
        #[arg(long, default_value_t = fringe_analysis::DEFAULT_ERROR_FRACTION)]
        error_fraction: f64,
    },

    /// Generate a synthetic fringe pattern, noise floor, and combined signal
    Generate {
        /// Directory for the generated CSV files (created if absent)
        output_dir: PathBuf,

        /// Length of the first interferometer arm in meters
        #[arg(long, default_value_t = 1.0)]
        length1: f64,

        /// Length of the second interferometer arm in meters
        #[arg(long, default_value_t = 1.000001)]
        length2: f64,

        /// Source wavelength in meters
        #[arg(long, default_value_t = 500e-9)]
        wavelength: f64,

        /// Noise floor amplitude
        #[arg(long, default_value_t = DEFAULT_NOISE_LEVEL)]
        noise_level: f64,

        /// Number of points in the sweep
        #[arg(long, default_value_t = DEFAULT_NUM_POINTS)]
        points: usize,

        /// Seed for reproducible noise
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn run_analyze(
    input_dir: &Path,
    output_dir: &Path,
    config: &BatchConfig,
) -> Result<ExitCode> {
    let summary = batch::process_directory(input_dir, output_dir, config)
        .with_context(|| format!("analyzing recordings in {}", input_dir.display()))?;

    for report in &summary.reports {
        println!(
            "{}: SNR = {:.2} +/- {:.2} dB, power ratio = {:.6}",
            report.file, report.snr_db, report.snr_db_error, report.power_ratio
        );
    }
    println!(
        "Saved analysis results to {}",
        output_dir.join(batch::SUMMARY_FILE).display()
    );

    if summary.all_failed() {
        warn!("every input file failed");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn run_generate(
    output_dir: &Path,
    length1: f64,
    length2: f64,
    wavelength: f64,
    noise_level: f64,
    points: usize,
    seed: Option<u64>,
) -> Result<ExitCode> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;

    let pattern = interference_pattern(length1, length2, wavelength, points)?;
    let noise = noise_floor(points, noise_level, seed)?;
    let combined = combine(&pattern.intensity, &noise)?;

    // Path differences are exported in micrometers, matching the recorded
    // data convention.
    let path_um = pattern.path_difference.mapv(|d| d * 1e6);
    let writes = [
        ("interference_pattern.csv", "Intensity", &pattern.intensity),
        ("noise.csv", "Noise", &noise),
        ("combined_signal.csv", "Signal", &combined),
    ];
    for (name, header, column) in writes {
        let path = output_dir.join(name);
        batch::io::write_columns(
            &path,
            "Path Difference (micrometers)",
            header,
            &path_um,
            column,
        )?;
        println!("Saved {}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Analyze {
            input_dir,
            output_dir,
            cutoff,
            sampling_rate,
            order,
            error_fraction,
        } => {
            let config = BatchConfig {
                filter: FilterSpec::new(cutoff, sampling_rate, order)?,
                error_fraction,
            };
            run_analyze(&input_dir, &output_dir, &config)
        }
        Commands::Generate {
            output_dir,
            length1,
            length2,
            wavelength,
            noise_level,
            points,
            seed,
        } => run_generate(
            &output_dir,
            length1,
            length2,
            wavelength,
            noise_level,
            points,
            seed,
        ),
    }
}
