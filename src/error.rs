//! Error types and result utilities for interferometer analysis operations.

use thiserror::Error;

/// Convenience type alias for results that may contain [`AnalysisError`].
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Error types that can occur during interferometer signal analysis.
///
/// All variants are deterministic validation failures raised synchronously
/// from the call that detects them. None of them is retryable.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Error that occurs when a filter specification is out of its valid range.
    ///
    /// This typically happens when the cutoff frequency does not lie strictly
    /// between 0 and the Nyquist frequency, or the filter order is zero.
    #[error("Invalid filter spec: {0}")]
    InvalidFilterSpec(String),

    /// Error that occurs when a sequence is too short for stable zero-phase filtering.
    ///
    /// A zero-phase filter of order `n` needs at least `3 * (2n + 1)` samples.
    #[error("Insufficient data: zero-phase filtering requires at least {required} samples, got {actual}")]
    InsufficientData {
        /// Minimum number of samples required by the filter order.
        required: usize,
        /// Number of samples actually supplied.
        actual: usize,
    },

    /// Error that occurs when two sequences that must be compared point-wise
    /// have different lengths.
    #[error("Length mismatch: signal has {signal_len} samples, noise has {noise_len}")]
    LengthMismatch {
        /// Length of the signal sequence.
        signal_len: usize,
        /// Length of the other sequence.
        noise_len: usize,
    },

    /// Error that occurs when the signal power is zero and a power ratio is undefined.
    #[error("Degenerate signal: zero signal power, power ratio undefined")]
    DegenerateSignal,

    /// Error that occurs when invalid parameters are provided to an operation.
    ///
    /// This includes cases like negative error fractions, non-positive
    /// wavelengths, or too few samples for an analysis.
    #[error("Invalid parameter error: {0}")]
    InvalidParameter(String),
}
