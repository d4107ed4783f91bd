//! Synthetic interferometer signal generation.
//!
//! Produces the Michelson fringe pattern, a Gaussian noise floor over the
//! same path-difference axis, and their combination. Used for calibration
//! and as test input for the analysis modules.

use std::f64::consts::PI;

use ndarray::Array1;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::{AnalysisError, AnalysisResult};

/// Default span of the path-difference sweep around its center, in meters.
pub const DEFAULT_SWEEP_HALF_SPAN: f64 = 2e-6;

/// Default number of points in a generated pattern.
pub const DEFAULT_NUM_POINTS: usize = 1000;

/// Default noise floor amplitude.
pub const DEFAULT_NOISE_LEVEL: f64 = 0.1;

/// A synthetic Michelson interference pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct InterferencePattern {
    /// Path difference of each point in meters.
    pub path_difference: Array1<f64>,
    /// Fringe intensity at each point, `I0 * (1 + cos(2*pi*d/wavelength))`.
    pub intensity: Array1<f64>,
}

/// Generates the interference pattern for two arm lengths.
///
/// The path difference is swept over `+-` [`DEFAULT_SWEEP_HALF_SPAN`] around
/// `length1 - length2` with unit peak intensity `I0 = 1`.
///
/// # Errors
/// Returns [`AnalysisError::InvalidParameter`] for a non-positive wavelength
/// or fewer than two points.
pub fn interference_pattern(
    length1: f64,
    length2: f64,
    wavelength: f64,
    num_points: usize,
) -> AnalysisResult<InterferencePattern> {
    if !(wavelength.is_finite() && wavelength > 0.0) {
        return Err(AnalysisError::InvalidParameter(format!(
            "wavelength must be positive and finite, got {wavelength}"
        )));
    }
    if num_points < 2 {
        return Err(AnalysisError::InvalidParameter(format!(
            "an interference pattern needs at least 2 points, got {num_points}"
        )));
    }

    let center = length1 - length2;
    let start = center - DEFAULT_SWEEP_HALF_SPAN;
    let step = 2.0 * DEFAULT_SWEEP_HALF_SPAN / (num_points - 1) as f64;

    let path_difference = Array1::from_iter((0..num_points).map(|i| start + i as f64 * step));
    let intensity = path_difference.mapv(|d| 1.0 + (2.0 * PI * d / wavelength).cos());

    Ok(InterferencePattern {
        path_difference,
        intensity,
    })
}

/// Generates a Gaussian noise floor of the given amplitude.
///
/// Passing a seed makes the output reproducible; `None` draws fresh entropy.
///
/// # Errors
/// Returns [`AnalysisError::InvalidParameter`] for a negative or non-finite
/// noise level or fewer than two points.
pub fn noise_floor(
    num_points: usize,
    noise_level: f64,
    seed: Option<u64>,
) -> AnalysisResult<Array1<f64>> {
    if num_points < 2 {
        return Err(AnalysisError::InvalidParameter(format!(
            "a noise floor needs at least 2 points, got {num_points}"
        )));
    }
    if !(noise_level.is_finite() && noise_level >= 0.0) {
        return Err(AnalysisError::InvalidParameter(format!(
            "noise level must be non-negative and finite, got {noise_level}"
        )));
    }
    let dist = Normal::new(0.0, 1.0).map_err(|e| {
        AnalysisError::InvalidParameter(format!("invalid noise distribution: {e}"))
    })?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    Ok(Array1::from_iter(
        (0..num_points).map(|_| noise_level * dist.sample(&mut rng)),
    ))
}

/// Combines a fringe intensity record with a noise floor, element-wise.
///
/// # Errors
/// Returns [`AnalysisError::LengthMismatch`] if the two records differ in
/// length.
pub fn combine(intensity: &Array1<f64>, noise: &Array1<f64>) -> AnalysisResult<Array1<f64>> {
    if intensity.len() != noise.len() {
        return Err(AnalysisError::LengthMismatch {
            signal_len: intensity.len(),
            noise_len: noise.len(),
        });
    }
    Ok(intensity + noise)
}
