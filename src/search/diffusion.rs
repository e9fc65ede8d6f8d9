// src/search/diffusion.rs

use super::oracle::check_width;
use crate::circuits::{Circuit, CircuitBuilder};
use crate::core::{QuantumState, Result};
use crate::operations::Operation;
use num_complex::Complex;

/// Inversion about the mean, `2|s><s| − I` over the uniform state `|s>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffusionOperator {
    num_bits: u32,
}

impl DiffusionOperator {
    /// Diffuser over an `num_bits`-wide register.
    pub fn new(num_bits: u32) -> Self {
        Self { num_bits }
    }

    /// Register width.
    pub fn num_bits(&self) -> u32 {
        self.num_bits
    }

    /// Closed form: `a_i ← 2·mean(a) − a_i`.
    pub fn apply(&self, state: &mut QuantumState) -> Result<()> {
        check_width(self.num_bits, state)?;
        let amps = state.vector_mut();
        let mean = amps.iter().sum::<Complex<f64>>() / amps.len() as f64;
        let twice_mean = mean * 2.0;
        for a in amps.iter_mut() {
            *a = twice_mean - *a;
        }
        Ok(())
    }

    /// Gate form `H X (sign flip of |1…1>) X H` on every bit.
    ///
    /// This realises `I − 2|s><s|`, the closed form times a global phase of
    /// −1, so measurement probabilities are identical.
    pub fn to_circuit(&self) -> Result<Circuit> {
        CircuitBuilder::new(self.num_bits)
            .on_every_bit(|target| Operation::Superposition { target })
            .on_every_bit(|target| Operation::BitFlip { target })
            .add_op(Operation::SignFlipAllOnes)
            .on_every_bit(|target| Operation::BitFlip { target })
            .on_every_bit(|target| Operation::Superposition { target })
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::Simulator;

    fn skewed_state() -> Result<QuantumState> {
        let raw = [0.1, -0.4, 0.3, 0.2, 0.5, -0.1, 0.6, 0.25];
        let norm = raw.iter().map(|x: &f64| x * x).sum::<f64>().sqrt();
        QuantumState::from_amplitudes(3, raw.iter().map(|x| Complex::new(x / norm, 0.0)).collect())
    }

    #[test]
    fn test_uniform_state_is_fixed_point() -> Result<()> {
        let mut state = QuantumState::uniform(3)?;
        let before = state.clone();
        DiffusionOperator::new(3).apply(&mut state)?;
        for (a, b) in state.vector().iter().zip(before.vector()) {
            assert!((a - b).norm() < 1e-12);
        }
        Ok(())
    }

    #[test]
    fn test_circuit_equals_closed_form_up_to_sign() -> Result<()> {
        let diffuser = DiffusionOperator::new(3);
        let mut direct = skewed_state()?;
        diffuser.apply(&mut direct)?;
        let gated = Simulator::new().run(&diffuser.to_circuit()?, skewed_state()?)?;
        for (a, b) in direct.vector().iter().zip(gated.vector()) {
            assert!((a + b).norm() < 1e-9, "direct {} vs gate {}", a, b);
        }
        Ok(())
    }
}
