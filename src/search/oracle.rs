// src/search/oracle.rs

//! Phase oracles marking the valid indices of a candidate index space.

use crate::circuits::{Circuit, CircuitBuilder};
use crate::core::constants::vig_constants::{DEFAULT_MAX_INDEX_BITS, HARD_MAX_INDEX_BITS};
use crate::core::{QuantumState, Result, VigError};
use crate::operations::Operation;
use tracing::debug;

/// Validity flag of every candidate index `0..N`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidityMap {
    flags: Vec<bool>,
}

impl ValidityMap {
    /// Wraps explicit flags; `flags[i]` is the validity of candidate `i`.
    pub fn from_flags(flags: Vec<bool>) -> Self {
        Self { flags }
    }

    /// Candidate `i` is valid iff `scores[i] < threshold`.
    pub fn from_scores(scores: &[f64], threshold: f64) -> Self {
        Self { flags: scores.iter().map(|&s| s < threshold).collect() }
    }

    /// Number of candidates `N`.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Returns `true` for an empty index space.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Validity of candidate `index`; out-of-range indices are invalid.
    pub fn is_valid(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(false)
    }

    /// Valid indices in ascending order.
    pub fn valid_indices(&self) -> Vec<usize> {
        self.flags.iter().enumerate().filter(|(_, v)| **v).map(|(i, _)| i).collect()
    }

    /// Number of valid candidates `M`.
    pub fn valid_count(&self) -> usize {
        self.flags.iter().filter(|v| **v).count()
    }

    /// Index bits needed to address this space: `max(1, ceil(log2 N))`.
    ///
    /// # Errors
    /// `DegenerateInput` for an empty map.
    pub fn num_index_bits(&self) -> Result<u32> {
        index_bits_for(self.flags.len())
    }
}

/// `max(1, ceil(log2 n))`.
pub(crate) fn index_bits_for(n: usize) -> Result<u32> {
    if n == 0 {
        return Err(VigError::DegenerateInput { message: "candidate index space is empty".to_string() });
    }
    Ok((usize::BITS - (n - 1).leading_zeros()).max(1))
}

/// Builds a [`PhaseOracle`] from a [`ValidityMap`], enforcing a width bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityOracleBuilder {
    max_index_bits: u32,
}

impl Default for ValidityOracleBuilder {
    fn default() -> Self {
        Self { max_index_bits: DEFAULT_MAX_INDEX_BITS }
    }
}

impl ValidityOracleBuilder {
    /// Builder with the default bound of 20 index bits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the width bound. Values above 30 are clamped to 30.
    pub fn with_max_index_bits(mut self, max_index_bits: u32) -> Self {
        self.max_index_bits = max_index_bits.min(HARD_MAX_INDEX_BITS);
        self
    }

    /// The effective width bound.
    pub fn max_index_bits(&self) -> u32 {
        self.max_index_bits
    }

    /// Builds the oracle for `map`.
    ///
    /// # Errors
    /// `DegenerateInput` for an empty map, `IndexSpaceOverflow` when the space
    /// needs more index bits than the bound allows.
    pub fn build(&self, map: &ValidityMap) -> Result<PhaseOracle> {
        let num_bits = map.num_index_bits()?;
        if num_bits > self.max_index_bits {
            return Err(VigError::IndexSpaceOverflow {
                candidates: map.len(),
                required_bits: num_bits,
                max_bits: self.max_index_bits,
            });
        }
        let marked = map.valid_indices();
        debug!(candidates = map.len(), marked = marked.len(), num_bits, "oracle built");
        Ok(PhaseOracle { num_bits, candidates: map.len(), marked })
    }
}

/// Negates the amplitude of every marked index.
///
/// Only indices below the candidate count can be marked; the padding indices
/// `N..2^n` are left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseOracle {
    num_bits: u32,
    candidates: usize,
    marked: Vec<usize>,
}

impl PhaseOracle {
    /// Width `n` of the index register.
    pub fn num_bits(&self) -> u32 {
        self.num_bits
    }

    /// Number of candidates `N` (the unpadded size of the space).
    pub fn candidates(&self) -> usize {
        self.candidates
    }

    /// Marked indices in ascending order.
    pub fn marked(&self) -> &[usize] {
        &self.marked
    }

    /// Whether `index` is marked.
    pub fn is_marked(&self, index: usize) -> bool {
        self.marked.binary_search(&index).is_ok()
    }

    /// Applies the oracle directly to the amplitude vector.
    ///
    /// # Errors
    /// `InvalidOperation` when the state width differs from the oracle's.
    pub fn apply(&self, state: &mut QuantumState) -> Result<()> {
        check_width(self.num_bits, state)?;
        let amps = state.vector_mut();
        for &index in &self.marked {
            amps[index] = -amps[index];
        }
        Ok(())
    }

    /// Gate-level form: for each marked index, `X` on its 0-bits, a sign flip
    /// of the all-ones index, then the same `X`s again.
    pub fn to_circuit(&self) -> Result<Circuit> {
        let mut builder = CircuitBuilder::new(self.num_bits);
        for &index in &self.marked {
            let zero_bits: Vec<Operation> = (0..self.num_bits)
                .filter(|bit| (index >> bit) & 1 == 0)
                .map(|target| Operation::BitFlip { target })
                .collect();
            builder = builder
                .add_ops(zero_bits.iter().copied())
                .add_op(Operation::SignFlipAllOnes)
                .add_ops(zero_bits);
        }
        builder.build()
    }
}

pub(crate) fn check_width(num_bits: u32, state: &QuantumState) -> Result<()> {
    if state.num_bits() != num_bits {
        return Err(VigError::InvalidOperation {
            message: format!("{}-bit operator applied to a {}-bit state", num_bits, state.num_bits()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::Simulator;

    #[test]
    fn test_index_bits() -> Result<()> {
        assert_eq!(index_bits_for(1)?, 1);
        assert_eq!(index_bits_for(2)?, 1);
        assert_eq!(index_bits_for(3)?, 2);
        assert_eq!(index_bits_for(4)?, 2);
        assert_eq!(index_bits_for(5)?, 3);
        assert_eq!(index_bits_for(1024)?, 10);
        assert!(matches!(index_bits_for(0), Err(VigError::DegenerateInput { .. })));
        Ok(())
    }

    #[test]
    fn test_from_scores_is_strict() {
        let map = ValidityMap::from_scores(&[10.0, 20.0, 30.0], 20.0);
        assert_eq!(map.valid_indices(), vec![0]);
        assert!(!map.is_valid(7));
    }

    #[test]
    fn test_apply_negates_marked_only() -> Result<()> {
        let map = ValidityMap::from_flags(vec![false, true, false, true, false]);
        let oracle = ValidityOracleBuilder::new().build(&map)?;
        assert_eq!(oracle.num_bits(), 3);
        let mut state = QuantumState::uniform(3)?;
        let before = state.vector().to_vec();
        oracle.apply(&mut state)?;
        for (i, (a, b)) in state.vector().iter().zip(&before).enumerate() {
            let expected = if i == 1 || i == 3 { -*b } else { *b };
            assert!((a - expected).norm() < 1e-12, "index {}", i);
        }
        Ok(())
    }

    #[test]
    fn test_circuit_matches_direct_application() -> Result<()> {
        let map = ValidityMap::from_flags(vec![true, false, false, true, false, true]);
        let oracle = ValidityOracleBuilder::new().build(&map)?;
        let mut direct = QuantumState::uniform(oracle.num_bits())?;
        oracle.apply(&mut direct)?;
        let gated = Simulator::new().run(&oracle.to_circuit()?, QuantumState::uniform(oracle.num_bits())?)?;
        for (a, b) in direct.vector().iter().zip(gated.vector()) {
            assert!((a - b).norm() < 1e-12);
        }
        Ok(())
    }

    #[test]
    fn test_width_bound() {
        let map = ValidityMap::from_flags(vec![true; 9]);
        let built = ValidityOracleBuilder::new().with_max_index_bits(3).build(&map);
        assert!(matches!(built, Err(VigError::IndexSpaceOverflow { candidates: 9, required_bits: 4, max_bits: 3 })));
        assert_eq!(ValidityOracleBuilder::new().with_max_index_bits(99).max_index_bits(), HARD_MAX_INDEX_BITS);
    }
}
