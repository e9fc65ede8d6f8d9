// src/analysis/recovery.rs

use super::scoring::shifted_chi_square;
use crate::core::{ALPHABET_SIZE, FrequencyProfile, Key, Result, Sequence, VigError};
use tracing::{debug, info};

/// Chi-square of every shift for every column: `table[column][shift]`.
pub type ColumnScores = Vec<[f64; ALPHABET_SIZE]>;

/// A key paired with its plaintext-likelihood score (lower is better).
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateKey {
    /// The candidate key.
    pub key: Key,
    /// Score of the decryption under this key.
    pub score: f64,
}

/// Result of [`KeyRecoverer::recover`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveredKey {
    /// Concatenation of the winning shift of every column.
    pub key: Key,
    /// Sum of the winning column chi-square scores.
    pub score: f64,
}

/// Recovers a key of known length by per-column chi-square minimisation.
///
/// Each column is treated as an independent Caesar cipher. That is only
/// informative when columns are long enough: English text needs roughly
/// `N ≥ 20·L` symbols before every column reliably resolves. Below that a wrong
/// character is an expected outcome, not an error.
#[derive(Debug, Clone, Copy)]
pub struct KeyRecoverer<'p> {
    profile: &'p FrequencyProfile,
}

impl<'p> KeyRecoverer<'p> {
    /// Recoverer scoring against `profile`.
    pub fn new(profile: &'p FrequencyProfile) -> Self {
        Self { profile }
    }

    /// The L×26 table of column chi-square scores.
    ///
    /// # Errors
    /// `InvalidKeyLength` when `key_len` is 0 or exceeds the ciphertext length.
    pub fn column_scores(&self, ciphertext: &Sequence, key_len: usize) -> Result<ColumnScores> {
        check_key_len(key_len, ciphertext.len())?;
        Ok(ciphertext
            .columns(key_len)
            .iter()
            .map(|column| {
                let counts = column.counts();
                std::array::from_fn(|shift| shifted_chi_square(&counts, shift as u8, self.profile))
            })
            .collect())
    }

    /// Recovers the most likely key of length `key_len`.
    pub fn recover(&self, ciphertext: &Sequence, key_len: usize) -> Result<RecoveredKey> {
        let table = self.column_scores(ciphertext, key_len)?;
        let mut shifts = Vec::with_capacity(key_len);
        let mut score = 0.0;
        for (column, scores) in table.iter().enumerate() {
            let (shift, best) = argmin(scores);
            debug!(column, shift, best, "column winner");
            shifts.push(shift);
            score += best;
        }
        let key = Key::from_shifts(shifts)?;
        info!(%key, score, "recovered key");
        Ok(RecoveredKey { key, score })
    }

    /// Shifts of every column sorted by ascending score (ties by shift).
    pub fn ranked_shifts(&self, ciphertext: &Sequence, key_len: usize) -> Result<Vec<Vec<(u8, f64)>>> {
        let table = self.column_scores(ciphertext, key_len)?;
        Ok(table
            .iter()
            .map(|scores| {
                let mut ranked: Vec<(u8, f64)> = scores.iter().enumerate().map(|(s, &v)| (s as u8, v)).collect();
                ranked.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
                ranked
            })
            .collect())
    }

    /// Every combination of each column's `top_n` best shifts, best first.
    ///
    /// Produces `top_n^L` keys, scored by the sum of their column scores.
    pub fn probable_keys(&self, ciphertext: &Sequence, key_len: usize, top_n: usize) -> Result<Vec<CandidateKey>> {
        if top_n == 0 || top_n > ALPHABET_SIZE {
            return Err(VigError::InvalidOperation {
                message: format!("top_n must be within 1..={}, got {}", ALPHABET_SIZE, top_n),
            });
        }
        let ranked = self.ranked_shifts(ciphertext, key_len)?;
        let mut partial: Vec<(Vec<u8>, f64)> = vec![(Vec::with_capacity(key_len), 0.0)];
        for column in &ranked {
            partial = partial
                .into_iter()
                .flat_map(|(prefix, score)| {
                    column.iter().take(top_n).map(move |&(shift, s)| {
                        let mut next = prefix.clone();
                        next.push(shift);
                        (next, score + s)
                    })
                })
                .collect();
        }
        let mut keys = partial
            .into_iter()
            .map(|(shifts, score)| Ok(CandidateKey { key: Key::from_shifts(shifts)?, score }))
            .collect::<Result<Vec<_>>>()?;
        keys.sort_by(|a, b| a.score.total_cmp(&b.score).then_with(|| a.key.cmp(&b.key)));
        Ok(keys)
    }
}

pub(crate) fn check_key_len(key_len: usize, sequence_len: usize) -> Result<()> {
    if key_len == 0 || key_len > sequence_len {
        return Err(VigError::InvalidKeyLength { requested: key_len, sequence_len });
    }
    Ok(())
}

fn argmin(scores: &[f64; ALPHABET_SIZE]) -> (u8, f64) {
    let mut best = (0u8, scores[0]);
    for (shift, &score) in scores.iter().enumerate().skip(1) {
        if score < best.1 {
            best = (shift as u8, score);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(text: &str) -> Result<Sequence> {
        let cleaned: String = text.chars().filter(|c| c.is_ascii_alphabetic()).map(|c| c.to_ascii_uppercase()).collect();
        Sequence::parse(&cleaned)
    }

    const PASSAGE: &str = "It was the best of times, it was the worst of times, it was the age of wisdom, \
        it was the age of foolishness, it was the epoch of belief, it was the epoch of incredulity, \
        it was the season of Light, it was the season of Darkness, it was the spring of hope, \
        it was the winter of despair, we had everything before us, we had nothing before us.";

    #[test]
    fn test_recover_caesar_key() -> Result<()> {
        let profile = FrequencyProfile::english();
        let plain = letters(PASSAGE)?;
        let cipher = Key::parse("H")?.encrypt(&plain);
        let recovered = KeyRecoverer::new(&profile).recover(&cipher, 1)?;
        assert_eq!(recovered.key.to_string(), "H");
        Ok(())
    }

    #[test]
    fn test_invalid_lengths() -> Result<()> {
        let profile = FrequencyProfile::english();
        let recoverer = KeyRecoverer::new(&profile);
        let cipher = Sequence::parse("ABCDE")?;
        assert!(matches!(recoverer.recover(&cipher, 0), Err(VigError::InvalidKeyLength { requested: 0, .. })));
        assert!(matches!(recoverer.recover(&cipher, 6), Err(VigError::InvalidKeyLength { requested: 6, sequence_len: 5 })));
        Ok(())
    }

    #[test]
    fn test_probable_keys_best_first_and_counted() -> Result<()> {
        let profile = FrequencyProfile::english();
        let plain = letters(PASSAGE)?;
        let cipher = Key::parse("DOG")?.encrypt(&plain);
        let recoverer = KeyRecoverer::new(&profile);
        let keys = recoverer.probable_keys(&cipher, 3, 2)?;
        assert_eq!(keys.len(), 8);
        let recovered = recoverer.recover(&cipher, 3)?;
        assert_eq!(keys[0].key, recovered.key);
        assert!((keys[0].score - recovered.score).abs() < 1e-9);
        assert!(keys.windows(2).all(|w| w[0].score <= w[1].score));
        assert!(recoverer.probable_keys(&cipher, 3, 0).is_err());
        Ok(())
    }
}
