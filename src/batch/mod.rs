//! Batch processing of recorded interferometer data.
//!
//! Walks an input directory for CSV recordings, runs the power-ratio
//! analysis on each, and writes a summary table. A single file's failure is
//! logged and isolated; the remaining files are still processed. Files are
//! independent, so the per-file work runs in parallel.

pub mod error;
pub mod io;

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{error, info};

use crate::analysis::power_ratio::{PowerRatioResult, analyze};
use crate::filter::FilterSpec;

pub use error::{BatchError, BatchResult};

/// Name of the summary CSV written into the output directory.
pub const SUMMARY_FILE: &str = "snr_results.csv";

/// Configuration for a batch run.
#[derive(Debug, Clone, Copy)]
pub struct BatchConfig {
    /// Separation filter applied to every file. Its sampling rate doubles as
    /// the declared sampling rate of the recordings.
    pub filter: FilterSpec,
    /// Relative measurement-error fraction propagated into each result.
    pub error_fraction: f64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            filter: FilterSpec::default(),
            error_fraction: crate::analysis::power_ratio::DEFAULT_ERROR_FRACTION,
        }
    }
}

/// Per-file analysis outcome for the summary table.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Base name of the analyzed file.
    #[serde(rename = "File")]
    pub file: String,
    /// Signal-to-noise ratio in dB.
    #[serde(rename = "SNR (dB)")]
    pub snr_db: f64,
    /// Uncertainty on the SNR in dB.
    #[serde(rename = "SNR Error (dB)")]
    pub snr_db_error: f64,
    /// Average power ratio, noise over signal.
    #[serde(rename = "Average Power Ratio (Noise/Signal)")]
    pub power_ratio: f64,
}

impl FileReport {
    fn new(path: &Path, result: &PowerRatioResult) -> Self {
        let file = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            file,
            snr_db: result.ratio_db,
            snr_db_error: result.ratio_db_error,
            power_ratio: result.ratio,
        }
    }
}

/// Outcome of a whole batch run.
#[derive(Debug)]
pub struct BatchSummary {
    /// Successfully analyzed files, in input order.
    pub reports: Vec<FileReport>,
    /// Failures, each carrying the file it belongs to.
    pub failures: Vec<BatchError>,
}

impl BatchSummary {
    /// True when every discovered file failed.
    pub fn all_failed(&self) -> bool {
        self.reports.is_empty() && !self.failures.is_empty()
    }
}

/// Lists all CSV files in a directory, case-insensitively, sorted by name.
///
/// # Errors
/// [`BatchError::Io`] if the directory cannot be read.
pub fn discover_csv_files(dir: &Path) -> BatchResult<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Analyzes one recording end to end.
fn process_file(path: &Path, config: &BatchConfig) -> BatchResult<FileReport> {
    let samples = io::read_recording(path, config.filter.sampling_rate)?.into_samples();
    let result = analyze(&samples, &config.filter, config.error_fraction)
        .map_err(|e| BatchError::analysis(path, e))?;
    Ok(FileReport::new(path, &result))
}

/// Processes every CSV recording in `input_dir` and writes a summary CSV to
/// `output_dir`, creating the directory if needed.
///
/// Per-file failures are logged and collected in the returned summary; they
/// do not abort the batch. Only the absence of any input file, or an I/O
/// failure on the output side, fails the whole run.
///
/// # Errors
/// [`BatchError::NoInputFiles`] when the input directory holds no CSV files;
/// [`BatchError::Io`]/[`BatchError::Csv`] for output-side failures.
pub fn process_directory(
    input_dir: &Path,
    output_dir: &Path,
    config: &BatchConfig,
) -> BatchResult<BatchSummary> {
    let files = discover_csv_files(input_dir)?;
    if files.is_empty() {
        return Err(BatchError::NoInputFiles {
            dir: input_dir.to_path_buf(),
        });
    }
    fs::create_dir_all(output_dir)?;

    let outcomes: Vec<BatchResult<FileReport>> = files
        .par_iter()
        .map(|path| process_file(path, config))
        .collect();

    let mut reports = Vec::new();
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(report) => {
                info!(file = %report.file, snr_db = report.snr_db, "processed recording");
                reports.push(report);
            }
            Err(failure) => {
                error!(%failure, "failed to process recording");
                failures.push(failure);
            }
        }
    }

    io::write_records(&output_dir.join(SUMMARY_FILE), &reports)?;
    info!(
        processed = reports.len(),
        failed = failures.len(),
        "batch complete"
    );

    Ok(BatchSummary { reports, failures })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    use std::io::Write;

    fn write_sine_csv(dir: &Path, name: &str, frequency: f64) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "Time,Signal").unwrap();
        for i in 0..1000 {
            let t = i as f64 / 1000.0;
            writeln!(file, "{t},{}", (2.0 * PI * frequency * t).sin()).unwrap();
        }
        path
    }

    #[test]
    fn test_discover_is_case_insensitive_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        write_sine_csv(dir.path(), "b.CSV", 10.0);
        write_sine_csv(dir.path(), "a.csv", 10.0);
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let files = discover_csv_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.csv", "b.CSV"]);
    }

    #[test]
    fn test_empty_directory_is_an_error() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let result = process_directory(input.path(), output.path(), &BatchConfig::default());
        assert!(matches!(result, Err(BatchError::NoInputFiles { .. })));
    }

    #[test]
    fn test_partial_failure_does_not_abort_batch() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();

        write_sine_csv(input.path(), "good.csv", 10.0);
        fs::write(input.path().join("bad.csv"), "Wrong,Header\n1,2\n").unwrap();

        let summary =
            process_directory(input.path(), output.path(), &BatchConfig::default()).unwrap();

        assert_eq!(summary.reports.len(), 1);
        assert_eq!(summary.failures.len(), 1);
        assert!(!summary.all_failed());
        assert_eq!(summary.reports[0].file, "good.csv");
        // A 10 Hz tone sits below the 50 Hz cutoff: clean signal, high SNR.
        assert!(summary.reports[0].snr_db > 40.0);
        assert!(output.path().join(SUMMARY_FILE).exists());
    }

    #[test]
    fn test_summary_csv_is_readable_back() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_sine_csv(input.path(), "run1.csv", 10.0);

        process_directory(input.path(), output.path(), &BatchConfig::default()).unwrap();

        let mut reader = csv::Reader::from_path(output.path().join(SUMMARY_FILE)).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.get(0), Some("File"));
        let rows: Vec<_> = reader.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(0), Some("run1.csv"));
    }

    #[test]
    fn test_too_short_recording_is_reported_per_file() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let path = input.path().join("short.csv");
        fs::write(&path, "Time,Signal\n0.0,1.0\n0.001,0.5\n").unwrap();

        let summary =
            process_directory(input.path(), output.path(), &BatchConfig::default()).unwrap();
        assert!(summary.all_failed());
        assert!(matches!(
            summary.failures[0],
            BatchError::Analysis { .. }
        ));
    }
}
