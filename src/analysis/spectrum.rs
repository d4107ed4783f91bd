//! Fourier analysis of interferometer signals.
//!
//! Computes the full discrete spectrum of a sampled signal so drift and
//! periodic disturbances can be located in frequency. The heavy lifting is
//! done by `rustfft`; this module only prepares the buffer and scales the
//! output.

use ndarray::Array1;
use num_complex::Complex64;
use rustfft::FftPlanner;

use crate::{AnalysisError, AnalysisResult};

/// Magnitude spectrum of a real signal.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    /// Frequency of each bin in Hz, in FFT order: non-negative frequencies
    /// first, then the negative half.
    pub frequencies: Array1<f64>,
    /// Magnitude of each bin, `|X[k]| / n`.
    pub magnitudes: Array1<f64>,
}

impl Spectrum {
    /// Returns the non-negative frequency with the largest magnitude,
    /// ignoring the DC bin.
    pub fn dominant_frequency(&self) -> Option<f64> {
        self.frequencies
            .iter()
            .zip(self.magnitudes.iter())
            .skip(1)
            .filter(|(f, _)| **f >= 0.0)
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(f, _)| *f)
    }
}

/// Frequency of bin `k` in an `n`-point DFT at the given sampling rate.
///
/// Follows the conventional DFT bin layout: bins up to (excluding) `n/2`
/// carry non-negative frequencies, the rest wrap around to negative ones.
fn bin_frequency(k: usize, n: usize, sample_rate: f64) -> f64 {
    let half = n.div_ceil(2);
    let index = if k < half {
        k as f64
    } else {
        k as f64 - n as f64
    };
    index * sample_rate / n as f64
}

/// Computes the magnitude spectrum of a real signal.
///
/// # Errors
/// Returns [`AnalysisError::InvalidParameter`] if the signal has fewer than
/// two samples or the sampling rate is not positive.
pub fn fourier_magnitude(signal: &Array1<f64>, sample_rate: f64) -> AnalysisResult<Spectrum> {
    let n = signal.len();
    if n < 2 {
        return Err(AnalysisError::InvalidParameter(format!(
            "Fourier analysis needs at least 2 samples, got {n}"
        )));
    }
    if !(sample_rate.is_finite() && sample_rate > 0.0) {
        return Err(AnalysisError::InvalidParameter(format!(
            "sampling rate must be positive and finite, got {sample_rate}"
        )));
    }

    let mut buffer: Vec<Complex64> = signal.iter().map(|&x| Complex64::new(x, 0.0)).collect();
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut buffer);

    let scale = 1.0 / n as f64;
    let magnitudes = Array1::from_iter(buffer.iter().map(|c| c.norm() * scale));
    let frequencies = Array1::from_iter((0..n).map(|k| bin_frequency(k, n, sample_rate)));

    Ok(Spectrum {
        frequencies,
        magnitudes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_bin_frequency_layout() {
        // Matches the usual fftfreq ordering for even and odd lengths.
        let freqs: Vec<f64> = (0..8).map(|k| bin_frequency(k, 8, 8.0)).collect();
        assert_eq!(freqs, vec![0.0, 1.0, 2.0, 3.0, -4.0, -3.0, -2.0, -1.0]);

        let freqs: Vec<f64> = (0..7).map(|k| bin_frequency(k, 7, 7.0)).collect();
        assert_eq!(freqs, vec![0.0, 1.0, 2.0, 3.0, -3.0, -2.0, -1.0]);
    }

    #[test]
    fn test_pure_tone_peaks_at_its_frequency() {
        let sample_rate = 1000.0;
        let n = 1000;
        let signal = Array1::from_iter(
            (0..n).map(|i| (2.0 * PI * 100.0 * i as f64 / sample_rate).sin()),
        );
        let spectrum = fourier_magnitude(&signal, sample_rate).unwrap();
        assert_eq!(spectrum.magnitudes.len(), n);
        assert_approx_eq!(spectrum.dominant_frequency().unwrap(), 100.0, 1e-9);
        // A unit sine concentrates half its amplitude in each of the +/-100 Hz
        // bins when the tone falls exactly on a bin.
        let peak_bin = 100;
        assert_approx_eq!(spectrum.magnitudes[peak_bin], 0.5, 1e-9);
    }

    #[test]
    fn test_constant_signal_is_pure_dc() {
        let signal = Array1::from_vec(vec![1.5; 64]);
        let spectrum = fourier_magnitude(&signal, 1000.0).unwrap();
        assert_approx_eq!(spectrum.magnitudes[0], 1.5, 1e-9);
        for k in 1..64 {
            assert!(spectrum.magnitudes[k] < 1e-9);
        }
    }

    #[test]
    fn test_degenerate_inputs_rejected() {
        let signal = Array1::from_vec(vec![1.0]);
        assert!(fourier_magnitude(&signal, 1000.0).is_err());
        let signal = Array1::from_vec(vec![1.0, 2.0]);
        assert!(fourier_magnitude(&signal, 0.0).is_err());
    }
}
