// src/circuits/mod.rs

//! Defines structures for representing and building ordered sequences of
//! operations (`vigrover::operations::Operation`) over a fixed-width index
//! register.

use crate::core::{Result, VigError};
use crate::operations::Operation;
use std::fmt;

/// An ordered sequence of operations over an `num_bits`-wide index register.
///
/// The width is fixed at construction so that `SignFlipAllOnes`, which names no
/// bit, still has a well-defined target index.
#[derive(Clone, PartialEq)]
pub struct Circuit {
    /// Width of the register the circuit acts on.
    num_bits: u32,
    /// The ordered sequence of operations. Order is significant.
    operations: Vec<Operation>,
}

impl Circuit {
    /// Creates a new, empty circuit over `num_bits` index bits.
    pub fn new(num_bits: u32) -> Self {
        Self { num_bits, operations: Vec::new() }
    }

    /// Appends one operation.
    ///
    /// # Errors
    /// `InvalidOperation` if the operation names a bit outside the register.
    pub fn add_operation(&mut self, op: Operation) -> Result<()> {
        if let Some(bit) = op.involved_bits().into_iter().find(|&b| b >= self.num_bits) {
            return Err(VigError::InvalidOperation {
                message: format!("{} targets bit {} of a {}-bit register", op, bit, self.num_bits),
            });
        }
        self.operations.push(op);
        Ok(())
    }

    /// Appends multiple operations in iteration order.
    pub fn add_operations<I>(&mut self, ops: I) -> Result<()>
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.add_operation(op)?;
        }
        Ok(())
    }

    /// Width of the index register.
    pub fn num_bits(&self) -> u32 {
        self.num_bits
    }

    /// Returns a slice containing the ordered sequence of operations in this circuit.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Returns the total number of operations defined in the circuit.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the circuit contains no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Appends every operation of `other`, which must have the same width.
    pub fn extend_from(&mut self, other: &Circuit) -> Result<()> {
        if other.num_bits != self.num_bits {
            return Err(VigError::InvalidOperation {
                message: format!("cannot append a {}-bit circuit to a {}-bit circuit", other.num_bits, self.num_bits),
            });
        }
        self.operations.extend_from_slice(&other.operations);
        Ok(())
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// A helper struct for programmatically constructing `Circuit` instances using method chaining.
///
/// Bit-range errors are deferred to [`build`](Self::build) so chains stay
/// uninterrupted.
pub struct CircuitBuilder {
    circuit: Circuit,
    error: Option<VigError>,
}

impl CircuitBuilder {
    /// Creates a new builder over `num_bits` index bits.
    pub fn new(num_bits: u32) -> Self {
        Self { circuit: Circuit::new(num_bits), error: None }
    }

    /// Adds a single operation to the circuit being built.
    pub fn add_op(mut self, op: Operation) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.circuit.add_operation(op) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Adds multiple operations from an iterator to the circuit being built.
    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self = self.add_op(op);
        }
        self
    }

    /// Applies `op(bit)` to every bit of the register, lowest bit first.
    pub fn on_every_bit<F>(self, op: F) -> Self
    where
        F: Fn(u32) -> Operation,
    {
        let num_bits = self.circuit.num_bits;
        self.add_ops((0..num_bits).map(op))
    }

    /// Finalizes the construction process and returns the built `Circuit`.
    ///
    /// # Errors
    /// The first `InvalidOperation` raised while adding operations.
    pub fn build(self) -> Result<Circuit> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.circuit),
        }
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "vigrover::Circuit[{} operations on {} bits]", self.operations.len(), self.num_bits)?;
        if self.operations.is_empty() {
            return Ok(());
        }

        const GATE_WIDTH: usize = 5;
        const H_WIRE: char = '─';

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            let total = GATE_WIDTH.saturating_sub(slen);
            let pre = total / 2;
            let post = total - pre;
            format!("{}{}{}", H_WIRE.to_string().repeat(pre), symbol, H_WIRE.to_string().repeat(post))
        }

        let label_width = format!("b{}", self.num_bits.saturating_sub(1)).len();
        // Most significant bit on the top row.
        for bit in (0..self.num_bits).rev() {
            write!(f, "{:<width$}: ", format!("b{}", bit), width = label_width)?;
            for op in &self.operations {
                let cell = match op {
                    Operation::SignFlipAllOnes => format_gate(if bit == 0 { "Z" } else { "@" }),
                    _ if op.involved_bits().contains(&bit) => format_gate(op.symbol()),
                    _ => H_WIRE.to_string().repeat(GATE_WIDTH),
                };
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_operations_in_order() -> Result<()> {
        let circuit = CircuitBuilder::new(2)
            .on_every_bit(|target| Operation::Superposition { target })
            .add_op(Operation::SignFlipAllOnes)
            .build()?;
        assert_eq!(
            circuit.operations(),
            &[
                Operation::Superposition { target: 0 },
                Operation::Superposition { target: 1 },
                Operation::SignFlipAllOnes
            ]
        );
        assert_eq!(circuit.num_bits(), 2);
        Ok(())
    }

    #[test]
    fn test_out_of_range_bit_rejected() {
        let built = CircuitBuilder::new(2).add_op(Operation::BitFlip { target: 2 }).build();
        assert!(matches!(built, Err(VigError::InvalidOperation { .. })));
    }

    #[test]
    fn test_display_has_one_row_per_bit() -> Result<()> {
        let circuit = CircuitBuilder::new(3).add_op(Operation::BitFlip { target: 1 }).add_op(Operation::SignFlipAllOnes).build()?;
        let rendered = circuit.to_string();
        assert_eq!(rendered.lines().count(), 4);
        assert!(rendered.contains("b1: ──X────@──"));
        Ok(())
    }
}
