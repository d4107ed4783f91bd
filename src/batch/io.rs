//! CSV input and output for recorded interferometer data.
//!
//! Recordings are `(Time, Signal)` tables; generated patterns and results
//! are written in the same tabular form so downstream tooling can pick them
//! up directly.

use std::path::Path;

use ndarray::Array1;
use serde::Serialize;

use crate::TimeSeries;
use crate::batch::error::{BatchError, BatchResult};

/// Header name of the time column in recorded CSVs.
pub const TIME_COLUMN: &str = "Time";
/// Header name of the signal column in recorded CSVs.
pub const SIGNAL_COLUMN: &str = "Signal";

/// Loads a `(Time, Signal)` CSV as a time series at the declared sampling rate.
///
/// The time column is read to validate the row structure but timestamps are
/// reconstructed from `sample_rate`, which the caller declares for the whole
/// batch. Rows with unparsable numbers fail the file.
///
/// # Errors
/// [`BatchError::Csv`] for unreadable or malformed files,
/// [`BatchError::MissingColumn`] when a required header is absent, and
/// [`BatchError::Analysis`] when the parsed data violates time-series
/// invariants (fewer than two rows, bad sampling rate).
pub fn read_recording(path: &Path, sample_rate: f64) -> BatchResult<TimeSeries> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| BatchError::csv(path, e))?;

    let headers = reader.headers().map_err(|e| BatchError::csv(path, e))?;
    let signal_idx = headers
        .iter()
        .position(|h| h.trim() == SIGNAL_COLUMN)
        .ok_or_else(|| BatchError::MissingColumn {
            path: path.to_path_buf(),
            column: SIGNAL_COLUMN.to_string(),
        })?;
    if !headers.iter().any(|h| h.trim() == TIME_COLUMN) {
        return Err(BatchError::MissingColumn {
            path: path.to_path_buf(),
            column: TIME_COLUMN.to_string(),
        });
    }

    let mut samples = Vec::new();
    for record in reader.deserialize::<Vec<f64>>() {
        let row = record.map_err(|e| BatchError::csv(path, e))?;
        match row.get(signal_idx) {
            Some(value) => samples.push(*value),
            None => {
                return Err(BatchError::MissingColumn {
                    path: path.to_path_buf(),
                    column: SIGNAL_COLUMN.to_string(),
                });
            }
        }
    }

    TimeSeries::from_vec(samples, sample_rate).map_err(|e| BatchError::analysis(path, e))
}

/// Writes two equal-length columns as a CSV with the given header names.
///
/// # Errors
/// [`BatchError::Csv`] if the file cannot be written.
pub fn write_columns(
    path: &Path,
    x_header: &str,
    y_header: &str,
    x: &Array1<f64>,
    y: &Array1<f64>,
) -> BatchResult<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| BatchError::csv(path, e))?;
    writer
        .write_record([x_header, y_header])
        .map_err(|e| BatchError::csv(path, e))?;
    for (a, b) in x.iter().zip(y.iter()) {
        writer
            .write_record([a.to_string(), b.to_string()])
            .map_err(|e| BatchError::csv(path, e))?;
    }
    writer.flush().map_err(BatchError::from)?;
    Ok(())
}

/// Writes serializable records as a CSV.
///
/// # Errors
/// [`BatchError::Csv`] if the file cannot be written.
pub fn write_records<S: Serialize>(path: &Path, records: &[S]) -> BatchResult<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| BatchError::csv(path, e))?;
    for record in records {
        writer
            .serialize(record)
            .map_err(|e| BatchError::csv(path, e))?;
    }
    writer.flush().map_err(BatchError::from)?;
    Ok(())
}
