//! Error handling logic

use thiserror::Error;

/// Errors raised by the cryptanalysis and amplitude-amplification components.
///
/// Only structurally invalid input is an error. A statistically wrong answer
/// (a wrong key length, a wrong key character) is an expected limitation of the
/// estimators and is returned as ordinary data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VigError {
    /// Input too short for the requested statistic.
    #[error("Degenerate input: {message}")]
    DegenerateInput {
        /// What was too short and why it matters
        message: String,
    },

    /// Kasiski examination found no repeated substrings at any scanned length.
    #[error("Inconclusive estimate: {message}")]
    InconclusiveEstimate {
        /// Inconclusive estimate message
        message: String,
    },

    /// Requested key length is zero or longer than the sequence it applies to.
    #[error("Invalid key length {requested} for a sequence of {sequence_len} symbols")]
    InvalidKeyLength {
        /// The key length that was asked for
        requested: usize,
        /// Length of the sequence the key would be applied to
        sequence_len: usize,
    },

    /// Candidate space needs more index bits than the configured bound allows.
    #[error("Index space overflow: {candidates} candidates need {required_bits} index bits, limit is {max_bits}")]
    IndexSpaceOverflow {
        /// Number of candidates in the index space
        candidates: usize,
        /// Bits needed to address them
        required_bits: u32,
        /// Configured limit
        max_bits: u32,
    },

    /// A character outside the 26-letter uppercase alphabet.
    #[error("Invalid symbol {symbol:?} at position {position}")]
    InvalidSymbol {
        /// The offending character
        symbol: char,
        /// Its position in the input text
        position: usize,
    },

    /// A frequency profile that is not a probability distribution over the alphabet.
    #[error("Invalid frequency profile: {message}")]
    InvalidProfile {
        /// Invalid profile message
        message: String,
    },

    /// An operation or configuration inconsistent with the state it targets.
    #[error("Invalid operation: {message}")]
    InvalidOperation {
        /// Invalid operation message
        message: String,
    },

    /// Amplitude vector lost normalisation.
    #[error("Incoherence: {message}")]
    Incoherence {
        /// Incoherence failure message
        message: String,
    },

    /// General failure inside the simulation process itself.
    #[error("Simulation process error: {message}")]
    SimulationError {
        /// Simulation failure message
        message: String,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VigError>;
