//! Intensity fluctuation analysis.
//!
//! Quantifies coherence properties of the light source from the recorded
//! intensity: mean level, fluctuation size, and relative phase stability.

use ndarray::Array1;
use serde::Serialize;

use crate::{AnalysisError, AnalysisResult};

/// Coherence statistics of a combined interference signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoherenceStats {
    /// Mean intensity of the signal.
    pub mean_intensity: f64,
    /// Standard deviation of the intensity (population, quantifies noise).
    pub std_intensity: f64,
    /// Relative phase stability over time, `std / mean`.
    ///
    /// Meaningful for intensity records with a nonzero mean level; the
    /// constructor rejects zero-mean input rather than dividing by zero.
    pub phase_stability: f64,
}

/// Computes coherence statistics for an intensity record.
///
/// # Errors
/// Returns [`AnalysisError::InvalidParameter`] if fewer than two samples are
/// supplied, or [`AnalysisError::DegenerateSignal`] if the mean intensity is
/// zero so the relative stability is undefined.
pub fn coherence_stats(intensity: &Array1<f64>) -> AnalysisResult<CoherenceStats> {
    if intensity.len() < 2 {
        return Err(AnalysisError::InvalidParameter(format!(
            "amplitude analysis needs at least 2 samples, got {}",
            intensity.len()
        )));
    }

    let mean_intensity = intensity.mean().unwrap_or(0.0);
    if mean_intensity == 0.0 {
        return Err(AnalysisError::DegenerateSignal);
    }

    let deviations = intensity - mean_intensity;
    let variance = (&deviations * &deviations).mean().unwrap_or(0.0);
    let std_intensity = variance.sqrt();

    Ok(CoherenceStats {
        mean_intensity,
        std_intensity,
        phase_stability: std_intensity / mean_intensity,
    })
}
