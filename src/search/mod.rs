// src/search/mod.rs

//! Amplitude-amplification search over a candidate index space.
//!
//! A run owns one `QuantumState` from start to finish:
//! Init (uniform) → (Oracle → Diffuser) × k → Measure → Done.

pub mod diffusion;
pub mod oracle;

pub use diffusion::DiffusionOperator;
pub use oracle::{PhaseOracle, ValidityMap, ValidityOracleBuilder};

use crate::circuits::Circuit;
use crate::core::constants::vig_constants::{DEFAULT_MAX_INDEX_BITS, HARD_MAX_INDEX_BITS};
use crate::core::{QuantumState, Result, VigError};
use crate::simulation::{MeasurementHistogram, Simulator};
use crate::validation::validate_state;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// How oracle and diffuser act on the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExecutionMode {
    /// Closed-form updates on the amplitude vector.
    #[default]
    Direct,
    /// Gate-by-gate execution of the oracle and diffuser circuits.
    GateLevel,
}

/// Parameters of one search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Oracle+diffuser rounds.
    pub iterations: usize,
    /// Measurement samples.
    pub shots: usize,
    /// Sampling seed. `None` derives one from the final probabilities.
    pub seed: Option<u64>,
    /// Closed-form or gate-level execution.
    pub execution: ExecutionMode,
    /// Widest oracle the search accepts.
    pub max_index_bits: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { iterations: 2, shots: 1024, seed: None, execution: ExecutionMode::default(), max_index_bits: DEFAULT_MAX_INDEX_BITS }
    }
}

/// Everything a finished run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    /// Sampled outcomes.
    pub histogram: MeasurementHistogram,
    /// Exact probability mass on marked indices before measurement.
    pub success_probability: f64,
    /// Rounds actually applied.
    pub iterations: usize,
}

/// One configured amplitude-amplification run.
pub struct AmplitudeAmplificationSearch {
    oracle: PhaseOracle,
    diffuser: DiffusionOperator,
    config: SearchConfig,
}

impl AmplitudeAmplificationSearch {
    /// Prepares a run over `oracle`'s index space.
    ///
    /// # Errors
    /// `IndexSpaceOverflow` when the oracle is wider than `max_index_bits`
    /// (clamped to 30).
    pub fn new(oracle: PhaseOracle, config: SearchConfig) -> Result<Self> {
        let max_bits = config.max_index_bits.min(HARD_MAX_INDEX_BITS);
        if oracle.num_bits() > max_bits {
            return Err(VigError::IndexSpaceOverflow {
                candidates: oracle.candidates(),
                required_bits: oracle.num_bits(),
                max_bits,
            });
        }
        let diffuser = DiffusionOperator::new(oracle.num_bits());
        Ok(Self { oracle, diffuser, config })
    }

    /// The oracle this run marks with.
    pub fn oracle(&self) -> &PhaseOracle {
        &self.oracle
    }

    /// Executes the run.
    ///
    /// # Errors
    /// `Incoherence` if the amplitude vector lost normalisation,
    /// `SimulationError` if sampling fails.
    pub fn run(&self) -> Result<SearchOutcome> {
        let num_bits = self.oracle.num_bits();
        let mut state = QuantumState::uniform(num_bits)?;
        debug!(num_bits, bytes = ?QuantumState::estimate_memory(num_bits), "search initialised");

        match self.config.execution {
            ExecutionMode::Direct => {
                for round in 0..self.config.iterations {
                    self.oracle.apply(&mut state)?;
                    self.diffuser.apply(&mut state)?;
                    debug!(round, marked_mass = self.marked_mass(&state), "round applied");
                }
            }
            ExecutionMode::GateLevel => {
                let mut round_circuit = Circuit::new(num_bits);
                round_circuit.extend_from(&self.oracle.to_circuit()?)?;
                round_circuit.extend_from(&self.diffuser.to_circuit()?)?;
                let simulator = Simulator::new();
                for round in 0..self.config.iterations {
                    state = simulator.run(&round_circuit, state)?;
                    debug!(round, marked_mass = self.marked_mass(&state), "round applied");
                }
            }
        }

        validate_state(&state, None)?;
        let success_probability = self.marked_mass(&state);
        let histogram = Simulator::new().measure(&state, self.config.shots, self.config.seed)?;
        info!(
            iterations = self.config.iterations,
            success_probability,
            most_frequent = ?histogram.most_frequent(),
            "search finished"
        );
        Ok(SearchOutcome { histogram, success_probability, iterations: self.config.iterations })
    }

    fn marked_mass(&self, state: &QuantumState) -> f64 {
        self.oracle.marked().iter().map(|&i| state.vector()[i].norm_sqr()).sum()
    }
}
