//! Signal-power-ratio estimation with propagated measurement uncertainty.
//!
//! The estimator splits a raw signal into a low-frequency "signal" part and a
//! high-frequency "noise" residual via zero-phase high-pass filtering, then
//! compares mean squared amplitudes. Every function here is a pure function
//! of its inputs: no state survives a call, so independent invocations can
//! run concurrently without coordination.

use ndarray::Array1;
use serde::Serialize;

use crate::filter::{FilterSpec, zero_phase_highpass};
use crate::{AnalysisError, AnalysisResult};

/// Default relative measurement-error fraction (0.5%).
pub const DEFAULT_ERROR_FRACTION: f64 = 0.005;

/// Result of a single power-ratio estimation.
///
/// Immutable; created once per call and owned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerRatioResult {
    /// Mean squared amplitude of the raw signal.
    pub signal_power: f64,
    /// Mean squared amplitude of the noise estimate.
    pub noise_power: f64,
    /// Average power ratio, `noise_power / signal_power`.
    pub ratio: f64,
    /// Signal-to-noise ratio in dB, `10 * log10(signal_power / noise_power)`.
    ///
    /// `+inf` when the noise power is exactly zero; a perfect signal is a
    /// legitimate physical outcome, not an error.
    pub ratio_db: f64,
    /// One-sigma uncertainty on `ratio_db` from first-order error propagation.
    pub ratio_db_error: f64,
}

/// Mean squared amplitude of a sequence.
fn mean_power(x: &Array1<f64>) -> f64 {
    let squares = x * x;
    squares.mean().unwrap_or(0.0)
}

/// Isolates the high-frequency residual of `signal` as a noise estimate.
///
/// Applies the spec's zero-phase high-pass Butterworth filter. The output has
/// the same length as the input and stays time-aligned with it, so point-wise
/// comparison against the raw signal remains meaningful downstream.
///
/// # Errors
/// - [`AnalysisError::InvalidFilterSpec`] if the spec fails validation.
/// - [`AnalysisError::InsufficientData`] if `signal` is shorter than
///   [`FilterSpec::min_samples`].
pub fn separate(signal: &Array1<f64>, spec: &FilterSpec) -> AnalysisResult<Array1<f64>> {
    zero_phase_highpass(signal, spec)
}

/// Computes the power ratio between a signal and its noise estimate.
///
/// `error_fraction` is the relative measurement error (e.g. `0.005` for
/// 0.5%) applied independently to both power estimates. The dB uncertainty
/// follows from first-order propagation through the log transform:
///
/// ```text
/// ratio_db_error = (10 / ln 10) * sqrt((s_sig/P_sig)^2 + (s_noise/P_noise)^2)
/// ```
///
/// With equal relative errors this collapses to `(10 * sqrt(2) / ln 10) * e`,
/// independent of the absolute powers. The propagation assumes the two power
/// estimates are independent; the noise here is derived from the signal
/// itself by filtering, so that assumption is a known simplification carried
/// over from the measurement procedure, not a verified physical derivation.
///
/// # Errors
/// - [`AnalysisError::LengthMismatch`] if the sequences differ in length.
/// - [`AnalysisError::DegenerateSignal`] if the signal power is zero.
/// - [`AnalysisError::InvalidParameter`] if `error_fraction` is negative or
///   not finite.
pub fn estimate(
    signal: &Array1<f64>,
    noise: &Array1<f64>,
    error_fraction: f64,
) -> AnalysisResult<PowerRatioResult> {
    if signal.len() != noise.len() {
        return Err(AnalysisError::LengthMismatch {
            signal_len: signal.len(),
            noise_len: noise.len(),
        });
    }
    if !(error_fraction.is_finite() && error_fraction >= 0.0) {
        return Err(AnalysisError::InvalidParameter(format!(
            "error fraction must be a non-negative finite number, got {error_fraction}"
        )));
    }

    let signal_power = mean_power(signal);
    let noise_power = mean_power(noise);

    if signal_power == 0.0 {
        return Err(AnalysisError::DegenerateSignal);
    }

    let ratio = noise_power / signal_power;
    let ratio_db = if noise_power == 0.0 {
        f64::INFINITY
    } else {
        10.0 * (signal_power / noise_power).log10()
    };

    // Both relative power errors equal error_fraction, so the propagated dB
    // uncertainty does not depend on the absolute power values.
    let ratio_db_error =
        10.0 / std::f64::consts::LN_10 * (2.0 * error_fraction * error_fraction).sqrt();

    Ok(PowerRatioResult {
        signal_power,
        noise_power,
        ratio,
        ratio_db,
        ratio_db_error,
    })
}

/// Convenience pipeline: [`separate`] then [`estimate`].
///
/// Errors from either stage are threaded through unchanged.
pub fn analyze(
    signal: &Array1<f64>,
    spec: &FilterSpec,
    error_fraction: f64,
) -> AnalysisResult<PowerRatioResult> {
    let noise = separate(signal, spec)?;
    estimate(signal, &noise, error_fraction)
}
