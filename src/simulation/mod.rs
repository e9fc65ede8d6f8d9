// src/simulation/mod.rs

//! Executes `vigrover::circuits::Circuit`s against a `QuantumState` and samples
//! measurement outcomes from the resulting amplitudes.

mod results;
pub(crate) mod engine;

pub use results::MeasurementHistogram;

use crate::circuits::Circuit;
use crate::core::{QuantumState, Result, VigError};
use engine::SimulationEngine;
use rand::SeedableRng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::StdRng;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::debug;

/// Runs circuits and measures states.
#[derive(Default)]
pub struct Simulator {}

impl Simulator {
    /// Creates a new Simulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies every operation of `circuit`, in order, to `state`.
    ///
    /// # Errors
    /// `InvalidOperation` when the circuit width differs from the state's.
    pub fn run(&self, circuit: &Circuit, state: QuantumState) -> Result<QuantumState> {
        if circuit.num_bits() != state.num_bits() {
            return Err(VigError::InvalidOperation {
                message: format!("{}-bit circuit applied to a {}-bit state", circuit.num_bits(), state.num_bits()),
            });
        }
        let mut engine = SimulationEngine::init(state);
        for op in circuit.operations() {
            engine.apply_operation(op)?;
        }
        debug!(operations = circuit.len(), dim = engine.state().dim(), "circuit applied");
        Ok(engine.into_state())
    }

    /// Draws `shots` outcomes from the probabilities `|a_i|^2`.
    ///
    /// Without an explicit `seed` the generator is seeded from a hash of the
    /// amplitudes, so the same state always yields the same histogram.
    ///
    /// # Errors
    /// `SimulationError` when the probabilities cannot form a distribution
    /// (all zero or non-finite).
    pub fn measure(&self, state: &QuantumState, shots: usize, seed: Option<u64>) -> Result<MeasurementHistogram> {
        let probabilities = state.probabilities();
        let seed = seed.unwrap_or_else(|| state_seed(&probabilities));
        let distribution = WeightedIndex::new(&probabilities)
            .map_err(|e| VigError::SimulationError { message: format!("cannot sample from state: {}", e) })?;
        let mut rng = StdRng::seed_from_u64(seed);

        let mut histogram = MeasurementHistogram::new(state.num_bits());
        for _ in 0..shots {
            histogram.record(distribution.sample(&mut rng) as u64);
        }
        debug!(shots, seed, distinct = histogram.counts().len(), "state measured");
        Ok(histogram)
    }
}

/// Deterministic seed derived from a probability vector.
fn state_seed(probabilities: &[f64]) -> u64 {
    let mut hasher = DefaultHasher::new();
    for p in probabilities {
        p.to_ne_bytes().hash(&mut hasher);
    }
    hasher.finish()
}
