//! Core representation of uniformly sampled interferometer signals.

use ndarray::Array1;

use crate::{AnalysisError, AnalysisResult};

/// A uniformly sampled time series of signal amplitudes.
///
/// The series owns its samples and carries the sampling rate they were
/// recorded at. Timestamps are implicit: sample `i` was taken at
/// `i / sample_rate` seconds, which guarantees strictly increasing,
/// pairwise distinct timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    samples: Array1<f64>,
    sample_rate: f64,
}

impl TimeSeries {
    /// Creates a new time series from an amplitude array and a sampling rate in Hz.
    ///
    /// # Errors
    /// Returns [`AnalysisError::InvalidParameter`] if fewer than two samples
    /// are supplied or the sampling rate is not a positive finite number.
    pub fn new(samples: Array1<f64>, sample_rate: f64) -> AnalysisResult<Self> {
        if samples.len() < 2 {
            return Err(AnalysisError::InvalidParameter(format!(
                "a time series needs at least 2 samples, got {}",
                samples.len()
            )));
        }
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(AnalysisError::InvalidParameter(format!(
                "sample rate must be positive and finite, got {sample_rate}"
            )));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Creates a new time series from a `Vec` of amplitudes.
    pub fn from_vec(samples: Vec<f64>, sample_rate: f64) -> AnalysisResult<Self> {
        Self::new(Array1::from_vec(samples), sample_rate)
    }

    /// Returns the sampled amplitudes.
    pub fn samples(&self) -> &Array1<f64> {
        &self.samples
    }

    /// Returns the sampling rate in Hz.
    pub const fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false: the constructor rejects series shorter than two samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the duration covered by the series in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate
    }

    /// Returns the implicit timestamp of each sample in seconds.
    pub fn timestamps(&self) -> Array1<f64> {
        let dt = 1.0 / self.sample_rate;
        Array1::from_iter((0..self.samples.len()).map(|i| i as f64 * dt))
    }

    /// Consumes the series, returning the underlying amplitude array.
    pub fn into_samples(self) -> Array1<f64> {
        self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;
    use ndarray::array;

    #[test]
    fn test_valid_series() {
        let ts = TimeSeries::new(array![0.0, 1.0, 0.0, -1.0], 1000.0).unwrap();
        assert_eq!(ts.len(), 4);
        assert_eq!(ts.sample_rate(), 1000.0);
        assert_eq!(ts.samples()[1], 1.0);
        assert!(!ts.is_empty());
        assert_approx_eq!(ts.duration_secs(), 0.004, 1e-12);
    }

    #[test]
    fn test_too_short_series_rejected() {
        let result = TimeSeries::new(array![1.0], 1000.0);
        assert!(matches!(result, Err(AnalysisError::InvalidParameter(_))));
    }

    #[test]
    fn test_invalid_sample_rate_rejected() {
        assert!(TimeSeries::new(array![0.0, 1.0], 0.0).is_err());
        assert!(TimeSeries::new(array![0.0, 1.0], -10.0).is_err());
        assert!(TimeSeries::new(array![0.0, 1.0], f64::NAN).is_err());
    }

    #[test]
    fn test_into_samples_returns_backing_array() {
        let ts = TimeSeries::new(array![0.5, -0.5, 0.25], 100.0).unwrap();
        assert_eq!(ts.into_samples(), array![0.5, -0.5, 0.25]);
    }

    #[test]
    fn test_timestamps_are_uniform() {
        let ts = TimeSeries::new(array![0.0, 1.0, 2.0, 3.0], 500.0).unwrap();
        let t = ts.timestamps();
        assert_eq!(t.len(), 4);
        assert_approx_eq!(t[0], 0.0, 1e-15);
        assert_approx_eq!(t[1], 0.002, 1e-12);
        assert_approx_eq!(t[3], 0.006, 1e-12);
    }
}
