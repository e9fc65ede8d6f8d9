// src/core/state.rs

use super::constants::vig_constants::HARD_MAX_INDEX_BITS;
use super::error::{Result, VigError};
use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

/// Dense amplitude vector over a `2^n` index space.
///
/// Owned exclusively by one amplitude-amplification run: created at Init,
/// mutated in place by the oracle and diffuser, sampled at Measure, dropped.
/// Basis index `i` corresponds to candidate index `i`; bit `b` of `i` is index
/// bit `b` (bit 0 least significant).
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct QuantumState {
    num_bits: u32,
    state_vector: Vec<Complex<f64>>,
}

impl QuantumState {
    /// Uniform superposition: every index carries amplitude `1/√(2^n)`.
    pub fn uniform(num_bits: u32) -> Result<Self> {
        let dim = dimension(num_bits)?;
        let amplitude = Complex::new(1.0 / (dim as f64).sqrt(), 0.0);
        Ok(Self { num_bits, state_vector: vec![amplitude; dim] })
    }

    /// Basis state `|0…0>`.
    pub fn zero(num_bits: u32) -> Result<Self> {
        let dim = dimension(num_bits)?;
        let mut state_vector = vec![Complex::zero(); dim];
        state_vector[0] = Complex::new(1.0, 0.0);
        Ok(Self { num_bits, state_vector })
    }

    /// Wraps an explicit amplitude vector, which must have length `2^n`.
    pub fn from_amplitudes(num_bits: u32, amplitudes: Vec<Complex<f64>>) -> Result<Self> {
        let dim = dimension(num_bits)?;
        if amplitudes.len() != dim {
            return Err(VigError::SimulationError {
                message: format!("amplitude vector has length {}, expected 2^{} = {}", amplitudes.len(), num_bits, dim),
            });
        }
        Ok(Self { num_bits, state_vector: amplitudes })
    }

    /// Provides read-only access to the amplitudes.
    pub fn vector(&self) -> &[Complex<f64>] {
        &self.state_vector
    }

    /// Mutable access for the oracle, diffuser and simulation engine.
    pub(crate) fn vector_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.state_vector
    }

    /// Number of index bits `n`.
    pub fn num_bits(&self) -> u32 {
        self.num_bits
    }

    /// Dimension `2^n`.
    pub fn dim(&self) -> usize {
        self.state_vector.len()
    }

    /// `|a_i|^2` for every index.
    pub fn probabilities(&self) -> Vec<f64> {
        self.state_vector.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Bytes needed to hold a state with `num_bits` index bits, or `None`
    /// when that does not fit in `usize`.
    pub fn estimate_memory(num_bits: u32) -> Option<usize> {
        1usize.checked_shl(num_bits)?.checked_mul(std::mem::size_of::<Complex<f64>>())
    }
}

fn dimension(num_bits: u32) -> Result<usize> {
    if num_bits == 0 {
        return Err(VigError::InvalidOperation { message: "state needs at least one index bit".to_string() });
    }
    if num_bits > HARD_MAX_INDEX_BITS {
        return Err(VigError::IndexSpaceOverflow {
            candidates: usize::MAX,
            required_bits: num_bits,
            max_bits: HARD_MAX_INDEX_BITS,
        });
    }
    1usize.checked_shl(num_bits).ok_or_else(|| VigError::SimulationError {
        message: "index bit count too large, state vector dimension overflows usize".to_string(),
    })
}

impl fmt::Display for QuantumState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State[")?;
        for (i, c) in self.state_vector.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_is_normalised() -> Result<()> {
        let state = QuantumState::uniform(3)?;
        assert_eq!(state.dim(), 8);
        let total: f64 = state.probabilities().iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_memory_estimate_saturates_to_none() {
        assert_eq!(QuantumState::estimate_memory(3), Some(8 * 16));
        assert_eq!(QuantumState::estimate_memory(63), None);
        assert_eq!(QuantumState::estimate_memory(64), None);
        assert_eq!(QuantumState::estimate_memory(u32::MAX), None);
    }

    #[test]
    fn test_zero_bits_and_too_many_bits_rejected() {
        assert!(matches!(QuantumState::uniform(0), Err(VigError::InvalidOperation { .. })));
        assert!(matches!(
            QuantumState::uniform(HARD_MAX_INDEX_BITS + 1),
            Err(VigError::IndexSpaceOverflow { .. })
        ));
    }

    #[test]
    fn test_from_amplitudes_checks_length() {
        let amps = vec![Complex::new(1.0, 0.0); 3];
        assert!(matches!(QuantumState::from_amplitudes(2, amps), Err(VigError::SimulationError { .. })));
    }
}
