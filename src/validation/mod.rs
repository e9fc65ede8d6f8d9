// src/validation/mod.rs

//! Integrity checks on the amplitude vector of a `QuantumState`.

use crate::core::{QuantumState, Result, VigError};

// Default tolerance (can be overridden by caller)
const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;

/// Checks that the state vector is normalised (`Σ|a_i|^2 ≈ 1`).
///
/// # Arguments
/// * `state` - The `QuantumState` to check.
/// * `tolerance` - Allowed deviation from 1.0. Defaults to `1e-9`.
///
/// # Returns
/// * `Ok(())` if normalised within tolerance.
/// * `Err(VigError::Incoherence)` otherwise.
pub fn check_normalization(state: &QuantumState, tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm_sq: f64 = state.vector().iter().map(|c| c.norm_sqr()).sum();
    if (norm_sq - 1.0).abs() > effective_tolerance {
        Err(VigError::Incoherence {
            message: format!("State vector normalization failed. Sum(|a_i|^2) = {} (Deviation > {})", norm_sq, effective_tolerance),
        })
    } else {
        Ok(())
    }
}

/// Checks that no amplitude is NaN or infinite.
pub fn check_finite(state: &QuantumState) -> Result<()> {
    match state.vector().iter().position(|c| !c.re.is_finite() || !c.im.is_finite()) {
        Some(index) => Err(VigError::Incoherence {
            message: format!("Amplitude at index {} is not finite: {}", index, state.vector()[index]),
        }),
        None => Ok(()),
    }
}

/// Runs every check on `state`: finiteness, then normalisation.
pub fn validate_state(state: &QuantumState, norm_tolerance: Option<f64>) -> Result<()> {
    check_finite(state)?;
    check_normalization(state, norm_tolerance)?;
    Ok(())
}
