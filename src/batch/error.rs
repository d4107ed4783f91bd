//! Error types for batch processing of recorded data files.

use std::path::PathBuf;

use thiserror::Error;

use crate::AnalysisError;

/// Result type for batch operations.
pub type BatchResult<T> = Result<T, BatchError>;

/// Errors that can occur while processing a directory of recordings.
#[derive(Error, Debug)]
pub enum BatchError {
    /// No input file matched the expected pattern in the input directory.
    #[error("No CSV files found in {}", dir.display())]
    NoInputFiles {
        /// The directory that was searched.
        dir: PathBuf,
    },

    /// An analysis failed for a specific file.
    #[error("Error processing {}: {source}", path.display())]
    Analysis {
        /// The file that failed.
        path: PathBuf,
        /// The underlying analysis error.
        source: AnalysisError,
    },

    /// A file could not be parsed as a (Time, Signal) CSV.
    #[error("Error reading {}: {source}", path.display())]
    Csv {
        /// The file that failed.
        path: PathBuf,
        /// The underlying CSV error.
        source: csv::Error,
    },

    /// A required column is missing from a CSV header.
    #[error("Missing column '{column}' in {}", path.display())]
    MissingColumn {
        /// The file with the incomplete header.
        path: PathBuf,
        /// The column that was expected.
        column: String,
    },

    /// I/O error during batch processing.
    #[error("I/O error during batch processing: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

impl BatchError {
    /// Wraps an analysis failure with the file it occurred in.
    pub fn analysis(path: impl Into<PathBuf>, source: AnalysisError) -> Self {
        Self::Analysis {
            path: path.into(),
            source,
        }
    }

    /// Wraps a CSV failure with the file it occurred in.
    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}
