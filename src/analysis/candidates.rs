// src/analysis/candidates.rs

//! Threshold-bounded enumeration of candidate keys.

use super::recovery::{CandidateKey, KeyRecoverer, check_key_len};
use super::scoring::chi_square;
use crate::core::{ALPHABET_SIZE, FrequencyProfile, Key, Result, Sequence, VigError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// How a completed candidate is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScoreMode {
    /// Chi-square of the whole decrypted text. No prefix can be ruled out, so
    /// all `26^L` leaves are visited.
    FullText,
    /// Sum of per-column chi-square scores. Each term is non-negative, so a
    /// prefix whose partial sum plus the remaining column minima reaches the
    /// threshold is pruned without losing any qualifying key.
    #[default]
    ColumnSum,
}

/// Parameters for [`CandidateKeyGenerator`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateConfig {
    /// Exact length of generated keys.
    pub key_len: usize,
    /// A candidate is kept iff its score is strictly below this value.
    pub threshold: f64,
    /// Scoring rule.
    pub mode: ScoreMode,
    /// Stop once this many candidates are accepted.
    pub max_candidates: Option<usize>,
}

impl Default for CandidateConfig {
    fn default() -> Self {
        Self { key_len: 1, threshold: 150.0, mode: ScoreMode::default(), max_candidates: None }
    }
}

/// Cooperative cancellation flag for a running generation.
#[derive(Debug, Clone, Default)]
pub struct AbortHandle {
    flag: Arc<AtomicBool>,
}

impl AbortHandle {
    /// A fresh, un-triggered handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the generation holding a clone of this handle to stop.
    pub fn abort(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether [`abort`](Self::abort) has been called.
    pub fn is_aborted(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Accepted candidates in generation order. Position in `candidates` is the
/// candidate's index in the search space.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateKeys {
    /// Accepted candidates, lexicographic by key.
    pub candidates: Vec<CandidateKey>,
    /// `false` when the search stopped early (abort or `max_candidates`).
    pub exhausted: bool,
    /// Tree nodes visited, leaves included.
    pub visited: u64,
}

impl CandidateKeys {
    /// Number of accepted candidates (`N`).
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns `true` if nothing scored below the threshold.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Scores in index order, for building a validity map.
    pub fn scores(&self) -> Vec<f64> {
        self.candidates.iter().map(|c| c.score).collect()
    }

    /// The key at candidate index `index`.
    pub fn key(&self, index: usize) -> Option<&Key> {
        self.candidates.get(index).map(|c| &c.key)
    }

    /// Candidate index of `key`, if it was accepted.
    pub fn position(&self, key: &Key) -> Option<usize> {
        self.candidates.iter().position(|c| &c.key == key)
    }

    /// Places `candidate` at its lexicographic position and returns its
    /// index. A key that is already present keeps its existing entry.
    pub fn insert(&mut self, candidate: CandidateKey) -> usize {
        match self.candidates.binary_search_by(|c| c.key.cmp(&candidate.key)) {
            Ok(index) => index,
            Err(index) => {
                self.candidates.insert(index, candidate);
                index
            }
        }
    }
}

/// Depth-first enumeration of keys of a fixed length whose decryption
/// scores below a threshold.
///
/// Traversal uses an explicit stack of per-depth shift cursors, so depth is
/// bounded by the key length rather than the call stack.
pub struct CandidateKeyGenerator<'p> {
    profile: &'p FrequencyProfile,
    config: CandidateConfig,
    abort: Option<AbortHandle>,
    required: Option<Key>,
}

impl<'p> CandidateKeyGenerator<'p> {
    /// Generator scoring against `profile`.
    pub fn new(profile: &'p FrequencyProfile, config: CandidateConfig) -> Self {
        Self { profile, config, abort: None, required: None }
    }

    /// Attaches a cancellation handle checked at every visited node.
    pub fn with_abort_handle(mut self, handle: AbortHandle) -> Self {
        self.abort = Some(handle);
        self
    }

    /// Keeps `key` in the result whatever its score, even when the
    /// enumeration stops before reaching it.
    pub fn with_required_key(mut self, key: Key) -> Self {
        self.required = Some(key);
        self
    }

    /// Enumerates accepted candidates over `ciphertext`.
    ///
    /// # Errors
    /// `InvalidKeyLength` when `key_len` is 0 or exceeds the ciphertext length;
    /// `InvalidOperation` for a NaN threshold or a required key of the wrong
    /// length.
    pub fn generate(&self, ciphertext: &Sequence) -> Result<CandidateKeys> {
        let len = self.config.key_len;
        check_key_len(len, ciphertext.len())?;
        if self.config.threshold.is_nan() {
            return Err(VigError::InvalidOperation { message: "candidate threshold is NaN".to_string() });
        }
        let threshold = self.config.threshold;
        if let Some(key) = self.required.as_ref().filter(|key| key.len() != len) {
            return Err(VigError::InvalidOperation {
                message: format!("required key {} does not have length {}", key, len),
            });
        }

        let table = KeyRecoverer::new(self.profile).column_scores(ciphertext, len)?;
        // remaining_min[d] = Σ_{i ≥ d} min over shifts of column i
        let mut remaining_min = vec![0.0; len + 1];
        for d in (0..len).rev() {
            let column_min = table[d].iter().copied().fold(f64::INFINITY, f64::min);
            remaining_min[d] = remaining_min[d + 1] + column_min;
        }

        let mut candidates = Vec::new();
        let mut exhausted = true;
        let mut visited: u64 = 0;
        let mut pruned: u64 = 0;

        let mut partial = vec![0.0; len + 1];
        let mut prefix: Vec<u8> = Vec::with_capacity(len);
        let mut stack: Vec<u8> = vec![0];

        while let Some(&shift) = stack.last() {
            let depth = stack.len() - 1;
            if shift as usize == ALPHABET_SIZE {
                stack.pop();
                prefix.pop();
                if let Some(parent) = stack.last_mut() {
                    *parent += 1;
                }
                continue;
            }
            if self.abort.as_ref().is_some_and(AbortHandle::is_aborted) {
                warn!(accepted = candidates.len(), "candidate generation aborted");
                exhausted = false;
                break;
            }
            visited += 1;

            let column_sum = partial[depth] + table[depth][shift as usize];
            if self.config.mode == ScoreMode::ColumnSum && column_sum + remaining_min[depth + 1] >= threshold {
                pruned += 1;
                advance(&mut stack);
                continue;
            }

            prefix.push(shift);
            if depth + 1 < len {
                partial[depth + 1] = column_sum;
                stack.push(0);
                continue;
            }

            let key = Key::from_shifts(prefix.clone())?;
            let score = match self.config.mode {
                ScoreMode::ColumnSum => column_sum,
                ScoreMode::FullText => chi_square(&key.decrypt(ciphertext), self.profile),
            };
            prefix.pop();
            advance(&mut stack);

            if score < threshold {
                if self.config.max_candidates.is_some_and(|max| candidates.len() >= max) {
                    warn!(max = candidates.len(), "candidate limit reached");
                    exhausted = false;
                    break;
                }
                debug!(%key, score, "candidate accepted");
                candidates.push(CandidateKey { key, score });
            }
        }

        let mut found = CandidateKeys { candidates, exhausted, visited };
        if let Some(key) = self.required.as_ref().filter(|key| found.position(key).is_none()) {
            let score = match self.config.mode {
                ScoreMode::ColumnSum => {
                    key.shifts().iter().zip(&table).map(|(&s, column)| column[s as usize]).sum::<f64>()
                }
                ScoreMode::FullText => chi_square(&key.decrypt(ciphertext), self.profile),
            };
            let index = found.insert(CandidateKey { key: key.clone(), score });
            debug!(%key, score, index, "required key added");
        }

        info!(accepted = found.len(), visited, pruned, exhausted, "candidate generation finished");
        Ok(found)
    }
}

fn advance(stack: &mut [u8]) {
    if let Some(top) = stack.last_mut() {
        *top += 1;
    }
}
