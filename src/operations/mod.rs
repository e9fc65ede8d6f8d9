// src/operations/mod.rs

//! Defines the gate-level operations used to express the validity oracle and
//! the diffusion operator as circuits.
//!
//! Every operation acts on the amplitude vector of a `QuantumState` over the
//! candidate index space. Bit `b` of a basis index is index bit `b`, with bit 0
//! the least significant.

use std::fmt;

/// A single gate applied to the index register.
///
/// The set is the minimum needed to write the oracle (`X`s around a
/// multi-controlled sign flip) and the diffuser (`H X (MCZ) X H`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Hadamard on one index bit: `|0> -> (|0> + |1>)/√2`, `|1> -> (|0> - |1>)/√2`.
    Superposition {
        /// Index bit the gate acts on.
        target: u32,
    },

    /// Pauli-X on one index bit: swaps the amplitudes of each pair of indices
    /// that differ only at `target`.
    BitFlip {
        /// Index bit the gate acts on.
        target: u32,
    },

    /// Negates the amplitude of the all-ones index `2^n − 1` and nothing else.
    ///
    /// Equivalent to a Z on the top bit controlled by every other bit (the
    /// `H · MCX · H` block).
    SignFlipAllOnes,
}

impl Operation {
    /// Index bits named in the operation's parameters. `SignFlipAllOnes` names
    /// none; it implicitly touches every bit of the register.
    pub fn involved_bits(&self) -> Vec<u32> {
        match self {
            Operation::Superposition { target } | Operation::BitFlip { target } => vec![*target],
            Operation::SignFlipAllOnes => Vec::new(),
        }
    }

    /// Short gate symbol used by circuit displays.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Superposition { .. } => "H",
            Operation::BitFlip { .. } => "X",
            Operation::SignFlipAllOnes => "Z*",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Superposition { target } | Operation::BitFlip { target } => {
                write!(f, "{}({})", self.symbol(), target)
            }
            Operation::SignFlipAllOnes => write!(f, "{}", self.symbol()),
        }
    }
}
