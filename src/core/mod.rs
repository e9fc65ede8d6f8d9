// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod sequence;
pub mod profile;
pub mod state;

pub use error::{Result, VigError};
pub use sequence::{Key, Sequence};
pub use profile::FrequencyProfile;
pub use state::QuantumState;

pub mod constants;
pub use constants::vig_constants::{ALPHABET_SIZE, PI}; // Re-export
