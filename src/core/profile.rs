// src/core/profile.rs

use super::constants::vig_constants::{ALPHABET_SIZE, ENGLISH_FREQUENCIES, PROFILE_SUM_TOLERANCE};
use super::error::{Result, VigError};
use serde::{Deserialize, Serialize};

/// Expected relative letter frequencies of the plaintext language.
///
/// Immutable once built. Every consumer (`KeyRecoverer`,
/// `CandidateKeyGenerator`, the attack pipeline) receives it explicitly rather
/// than reading a global table, so a different language can be swapped in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct FrequencyProfile {
    frequencies: [f64; ALPHABET_SIZE],
}

impl FrequencyProfile {
    /// Validates and wraps a frequency table.
    ///
    /// Every entry must be finite and strictly positive (chi-square divides by
    /// the expected count) and the entries must sum to 1.0 within tolerance.
    pub fn new(frequencies: [f64; ALPHABET_SIZE]) -> Result<Self> {
        if let Some(i) = frequencies.iter().position(|f| !f.is_finite() || *f <= 0.0) {
            return Err(VigError::InvalidProfile {
                message: format!("frequency for '{}' must be positive, got {}", (b'A' + i as u8) as char, frequencies[i]),
            });
        }
        let total: f64 = frequencies.iter().sum();
        if (total - 1.0).abs() > PROFILE_SUM_TOLERANCE {
            return Err(VigError::InvalidProfile {
                message: format!("frequencies sum to {} (tolerance {})", total, PROFILE_SUM_TOLERANCE),
            });
        }
        Ok(Self { frequencies })
    }

    /// Standard English letter frequencies.
    pub fn english() -> Self {
        Self { frequencies: ENGLISH_FREQUENCIES }
    }

    /// Expected relative frequency of symbol `symbol` (`0..26`).
    pub fn frequency(&self, symbol: u8) -> f64 {
        self.frequencies[symbol as usize]
    }

    /// The full table, `A` through `Z`.
    pub fn frequencies(&self) -> &[f64; ALPHABET_SIZE] {
        &self.frequencies
    }
}

impl Default for FrequencyProfile {
    fn default() -> Self {
        Self::english()
    }
}

impl TryFrom<Vec<f64>> for FrequencyProfile {
    type Error = VigError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        let frequencies: [f64; ALPHABET_SIZE] = values.try_into().map_err(|v: Vec<f64>| VigError::InvalidProfile {
            message: format!("expected {} frequencies, got {}", ALPHABET_SIZE, v.len()),
        })?;
        Self::new(frequencies)
    }
}

impl From<FrequencyProfile> for Vec<f64> {
    fn from(profile: FrequencyProfile) -> Self {
        profile.frequencies.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_table_is_a_valid_profile() {
        assert!(FrequencyProfile::new(ENGLISH_FREQUENCIES).is_ok());
        assert!((FrequencyProfile::english().frequency(4) - 0.12702).abs() < 1e-12); // 'E'
    }

    #[test]
    fn test_rejects_zero_entry_and_bad_sum() {
        let mut zero = ENGLISH_FREQUENCIES;
        zero[25] = 0.0;
        assert!(matches!(FrequencyProfile::new(zero), Err(VigError::InvalidProfile { .. })));

        let doubled = ENGLISH_FREQUENCIES.map(|f| f * 2.0);
        assert!(matches!(FrequencyProfile::new(doubled), Err(VigError::InvalidProfile { .. })));
    }

    #[test]
    fn test_wrong_arity_rejected() {
        assert!(matches!(FrequencyProfile::try_from(vec![1.0]), Err(VigError::InvalidProfile { .. })));
    }
}
