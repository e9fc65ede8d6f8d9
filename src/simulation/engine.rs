// src/simulation/engine.rs
use crate::core::{QuantumState, Result, VigError};
use crate::operations::Operation;
use num_complex::Complex;
use num_traits::Zero;
use std::f64::consts::FRAC_1_SQRT_2;
use tracing::trace;

/// Applies gate-level operations to a `QuantumState` it owns.
/// (Internal visibility)
pub(crate) struct SimulationEngine {
    state: QuantumState,
}

impl SimulationEngine {
    /// Wraps an existing state; the engine evolves it in place.
    pub(crate) fn init(state: QuantumState) -> Self {
        Self { state }
    }

    pub(crate) fn state(&self) -> &QuantumState {
        &self.state
    }

    /// Hands the evolved state back to the caller.
    pub(crate) fn into_state(self) -> QuantumState {
        self.state
    }

    /// Applies a single operation to the state vector.
    pub(crate) fn apply_operation(&mut self, op: &Operation) -> Result<()> {
        trace!(%op, "applying operation");
        match op {
            Operation::Superposition { target } => self.apply_single_bit_gate(*target, &superposition_matrix()),
            Operation::BitFlip { target } => self.apply_single_bit_gate(*target, &bit_flip_matrix()),
            Operation::SignFlipAllOnes => {
                let vector = self.state.vector_mut();
                if let Some(last) = vector.last_mut() {
                    *last = -*last;
                }
                Ok(())
            }
        }
    }

    /// Applies a 2x2 matrix to index bit `target` of every basis pair.
    fn apply_single_bit_gate(&mut self, target: u32, matrix: &[[Complex<f64>; 2]; 2]) -> Result<()> {
        let num_bits = self.state.num_bits();
        if target >= num_bits {
            return Err(VigError::InvalidOperation {
                message: format!("gate targets bit {} of a {}-bit state", target, num_bits),
            });
        }
        let k_mask = 1usize << target; // Mask for the target bit
        let lower_mask = k_mask - 1; // Bits below the target
        let upper_mask = !((k_mask << 1) - 1); // Bits above the target

        let dim = self.state.dim();
        let vector = self.state.vector_mut();

        // Iterate over pairs of basis states differing only at the target bit
        for i in 0..dim / 2 {
            let i0 = ((i << 1) & upper_mask) | (i & lower_mask);
            let i1 = i0 | k_mask;

            let psi_0 = vector[i0];
            let psi_1 = vector[i1];

            vector[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            vector[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
        Ok(())
    }
}

fn superposition_matrix() -> [[Complex<f64>; 2]; 2] {
    [
        [Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(FRAC_1_SQRT_2, 0.0)],
        [Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(-FRAC_1_SQRT_2, 0.0)],
    ]
}

fn bit_flip_matrix() -> [[Complex<f64>; 2]; 2] {
    [
        [Complex::zero(), Complex::new(1.0, 0.0)],
        [Complex::new(1.0, 0.0), Complex::zero()],
    ]
}
