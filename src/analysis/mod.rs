// src/analysis/mod.rs

//! Classical ciphertext statistics: coincidence, chi-square scoring, key-length
//! estimation, per-column key recovery and threshold-bounded candidate
//! enumeration.

pub mod candidates;
pub mod coincidence;
pub mod key_length;
pub mod recovery;
pub mod scoring;

pub use candidates::{AbortHandle, CandidateConfig, CandidateKeyGenerator, CandidateKeys, ScoreMode};
pub use coincidence::{index_of_coincidence, mean_column_coincidence};
pub use key_length::{
    KasiskiConfig, KeyLengthEstimate, KeyLengthEstimator, LengthPolicy, friedman_estimate, friedman_key_length,
    kasiski_distances, kasiski_examination,
};
pub use recovery::{CandidateKey, ColumnScores, KeyRecoverer, RecoveredKey};
pub use scoring::{chi_square, chi_square_counts};
