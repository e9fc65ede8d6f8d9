// src/lib.rs

//! `vigrover` - Ciphertext-only Vigenère cryptanalysis with a simulated
//! amplitude-amplification key search.
//!
//! The statistical half estimates the key length (Kasiski, Friedman and a
//! column-coincidence scan), recovers a key column by column with chi-square
//! scoring and enumerates every key scoring under a threshold. The search half
//! marks the acceptable candidates with a phase oracle and amplifies them by
//! repeated inversion about the mean over a dense amplitude vector, either in
//! closed form or gate by gate.

pub mod analysis;
pub mod attack;
pub mod benchmark;
pub mod circuits;
pub mod core;
pub mod operations;
pub mod search;
pub mod simulation;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use analysis::{
    AbortHandle, CandidateConfig, CandidateKeyGenerator, CandidateKeys, KeyLengthEstimate, KeyLengthEstimator,
    KeyRecoverer, LengthPolicy, ScoreMode, index_of_coincidence,
};
pub use attack::{AttackConfig, AttackReport, VigenereAttack};
pub use benchmark::{CostBenchmark, optimal_iterations};
pub use circuits::{Circuit, CircuitBuilder};
pub use core::{FrequencyProfile, Key, QuantumState, Result, Sequence, VigError};
pub use operations::Operation;
pub use search::{
    AmplitudeAmplificationSearch, DiffusionOperator, ExecutionMode, PhaseOracle, SearchConfig, SearchOutcome,
    ValidityMap, ValidityOracleBuilder,
};
pub use simulation::{MeasurementHistogram, Simulator};
pub use validation::{check_normalization, validate_state};

// Example: one marked candidate out of four
// A single oracle+diffuser round moves all probability onto the marked index,
// so every shot lands there.
/// ```
/// use vigrover::{AmplitudeAmplificationSearch, SearchConfig, ValidityMap, ValidityOracleBuilder, VigError};
///
/// fn main() -> Result<(), VigError> {
///     let map = ValidityMap::from_flags(vec![false, false, true, false]);
///     let oracle = ValidityOracleBuilder::new().build(&map)?;
///     let config = SearchConfig { iterations: 1, shots: 100, seed: Some(42), ..SearchConfig::default() };
///
///     let outcome = AmplitudeAmplificationSearch::new(oracle, config)?.run()?;
///     println!("{}", outcome.histogram);
///
///     assert!((outcome.success_probability - 1.0).abs() < 1e-9);
///     assert_eq!(outcome.histogram.most_frequent(), Some(2));
///     assert_eq!(outcome.histogram.to_bit_strings().get("10"), Some(&100));
///     Ok(())
/// }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
