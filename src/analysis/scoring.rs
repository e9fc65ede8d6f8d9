// src/analysis/scoring.rs

//! Chi-square goodness of fit against a `FrequencyProfile`. Lower is more
//! language-like.

use crate::core::{ALPHABET_SIZE, FrequencyProfile, Sequence};

/// Chi-square statistic of observed symbol counts against `profile`.
///
/// `Σ (O_c − E_c)² / E_c` with `E_c = p_c · N`. An empty observation scores 0.
pub fn chi_square_counts(counts: &[usize; ALPHABET_SIZE], profile: &FrequencyProfile) -> f64 {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }
    let n = total as f64;
    counts
        .iter()
        .zip(profile.frequencies())
        .map(|(&observed, &p)| {
            let expected = p * n;
            let diff = observed as f64 - expected;
            diff * diff / expected
        })
        .sum()
}

/// Chi-square statistic of a plaintext candidate.
pub fn chi_square(text: &Sequence, profile: &FrequencyProfile) -> f64 {
    chi_square_counts(&text.counts(), profile)
}

/// Chi-square of `column` decrypted with Caesar shift `shift`, computed from
/// the ciphertext counts without materialising the decryption.
pub(crate) fn shifted_chi_square(cipher_counts: &[usize; ALPHABET_SIZE], shift: u8, profile: &FrequencyProfile) -> f64 {
    let mut plain_counts = [0usize; ALPHABET_SIZE];
    for (c, &count) in cipher_counts.iter().enumerate() {
        let p = (c + ALPHABET_SIZE - shift as usize) % ALPHABET_SIZE;
        plain_counts[p] = count;
    }
    chi_square_counts(&plain_counts, profile)
}
