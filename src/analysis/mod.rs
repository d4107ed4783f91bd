//! Analysis operations for interferometer signal data.
//!
//! Each submodule is a self-contained, stateless transform: it takes sampled
//! data in, computes one physical quantity, and returns an owned result.

pub mod amplitude;
pub mod phase;
pub mod power_ratio;
pub mod spectrum;

pub use amplitude::{CoherenceStats, coherence_stats};
pub use phase::{displacement, normalize_intensity, phase_shifts, strain};
pub use power_ratio::{DEFAULT_ERROR_FRACTION, PowerRatioResult, analyze, estimate, separate};
pub use spectrum::{Spectrum, fourier_magnitude};
