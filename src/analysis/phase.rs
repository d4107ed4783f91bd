//! Phase-shift and strain analysis.
//!
//! Inverts the Michelson intensity relation to recover path-length changes:
//! small mirror displacements and vibrations show up as intensity changes,
//! and dividing the recovered displacement by the arm length gives strain.

use std::f64::consts::PI;

use ndarray::Array1;

use crate::{AnalysisError, AnalysisResult};

/// Wavelength of a helium-neon laser in meters.
pub const HENE_WAVELENGTH: f64 = 632.8e-9;

/// Default source wavelength in meters (500 nm).
pub const DEFAULT_WAVELENGTH: f64 = 500e-9;

/// Default interferometer arm length in meters.
pub const DEFAULT_ARM_LENGTH: f64 = 1.0;

fn check_wavelength(wavelength: f64) -> AnalysisResult<()> {
    if !(wavelength.is_finite() && wavelength > 0.0) {
        return Err(AnalysisError::InvalidParameter(format!(
            "wavelength must be positive and finite, got {wavelength}"
        )));
    }
    Ok(())
}

/// Inverse of the fringe relation, clamped to the arccos domain.
///
/// Noisy intensity values can stray outside `[0, 2*I0]`; clamping maps them
/// to the nearest physical phase instead of producing NaN.
fn fringe_arccos(intensity: f64, peak_intensity: f64) -> f64 {
    ((intensity - peak_intensity) / peak_intensity)
        .clamp(-1.0, 1.0)
        .acos()
}

/// Normalizes an intensity record to the range `[0, 1]`.
///
/// # Errors
/// Returns [`AnalysisError::DegenerateSignal`] if the record is constant, in
/// which case min-max scaling is undefined.
pub fn normalize_intensity(intensity: &Array1<f64>) -> AnalysisResult<Array1<f64>> {
    let min = intensity.iter().copied().fold(f64::INFINITY, f64::min);
    let max = intensity.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !(min.is_finite() && max.is_finite()) || min == max {
        return Err(AnalysisError::DegenerateSignal);
    }
    let span = max - min;
    Ok(intensity.mapv(|x| (x - min) / span))
}

/// Recovers per-sample phase shifts, expressed as path-length change in
/// meters, from a combined interference signal.
///
/// Uses `arccos((I - I0) / I0) * wavelength / (2*pi)` with `I0` the peak
/// intensity the fringe pattern was normalized to.
///
/// # Errors
/// Returns [`AnalysisError::InvalidParameter`] for a non-positive wavelength
/// or peak intensity.
pub fn phase_shifts(
    combined: &Array1<f64>,
    wavelength: f64,
    peak_intensity: f64,
) -> AnalysisResult<Array1<f64>> {
    check_wavelength(wavelength)?;
    if !(peak_intensity.is_finite() && peak_intensity > 0.0) {
        return Err(AnalysisError::InvalidParameter(format!(
            "peak intensity must be positive and finite, got {peak_intensity}"
        )));
    }
    let scale = wavelength / (2.0 * PI);
    Ok(combined.mapv(|i| fringe_arccos(i, peak_intensity) * scale))
}

/// Mirror displacement in meters from a normalized intensity record.
///
/// `displacement = wavelength / (4*pi) * arccos((I - I0) / I0)` with
/// `I0 = 1` for intensity normalized into `[0, 1]`.
///
/// # Errors
/// Returns [`AnalysisError::InvalidParameter`] for a non-positive wavelength.
pub fn displacement(
    normalized_intensity: &Array1<f64>,
    wavelength: f64,
) -> AnalysisResult<Array1<f64>> {
    check_wavelength(wavelength)?;
    let scale = wavelength / (4.0 * PI);
    Ok(normalized_intensity.mapv(|i| fringe_arccos(i, 1.0) * scale))
}

/// Strain of the interferometer arm: displacement over arm length.
///
/// # Errors
/// Returns [`AnalysisError::InvalidParameter`] for a non-positive arm length.
pub fn strain(displacement: &Array1<f64>, arm_length: f64) -> AnalysisResult<Array1<f64>> {
    if !(arm_length.is_finite() && arm_length > 0.0) {
        return Err(AnalysisError::InvalidParameter(format!(
            "arm length must be positive and finite, got {arm_length}"
        )));
    }
    Ok(displacement.mapv(|d| d / arm_length))
}
