// src/analysis/key_length.rs

//! Key-length estimation: Kasiski examination, the Friedman test and a
//! column-coincidence scan, merged into one candidate set with an explicit
//! selection policy.

use super::coincidence::{index_of_coincidence, mean_column_coincidence};
use crate::core::constants::vig_constants::DEFAULT_COINCIDENCE_THRESHOLD;
use crate::core::{Result, Sequence, VigError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

/// Substring bounds for Kasiski examination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KasiskiConfig {
    /// Shortest repeated substring considered.
    pub min_len: usize,
    /// Longest repeated substring considered (inclusive).
    pub max_len: usize,
    /// Report every divisor ≥ 2 of the folded GCD instead of the GCD alone.
    pub expand_divisors: bool,
}

impl Default for KasiskiConfig {
    fn default() -> Self {
        Self { min_len: 3, max_len: 5, expand_divisors: false }
    }
}

impl KasiskiConfig {
    fn validate(&self) -> Result<()> {
        if self.min_len == 0 || self.min_len > self.max_len {
            return Err(VigError::InvalidOperation {
                message: format!("Kasiski substring bounds {}..={} are empty or start at zero", self.min_len, self.max_len),
            });
        }
        Ok(())
    }
}

/// Distances between consecutive occurrences of every repeated substring.
///
/// Occurrences of one substring are taken in position order and only
/// neighbouring pairs contribute, not every pair.
pub fn kasiski_distances(seq: &Sequence, config: &KasiskiConfig) -> Result<Vec<usize>> {
    config.validate()?;
    let symbols = seq.symbols();
    let mut distances = Vec::new();
    for size in config.min_len..=config.max_len {
        if size > symbols.len() {
            break;
        }
        let mut last_seen: HashMap<&[u8], usize> = HashMap::new();
        for (start, window) in symbols.windows(size).enumerate() {
            if let Some(previous) = last_seen.insert(window, start) {
                distances.push(start - previous);
            }
        }
    }
    Ok(distances)
}

/// Kasiski examination.
///
/// All consecutive-occurrence distances are folded through one running GCD
/// `g`, and the result is `{g}`. With `expand_divisors` it is every divisor
/// ≥ 2 of `g` instead (`{1}` when `g` is 1). An empty set means no substring
/// repeated: inconclusive.
pub fn kasiski_examination(seq: &Sequence, config: &KasiskiConfig) -> Result<BTreeSet<usize>> {
    let distances = kasiski_distances(seq, config)?;
    let folded = distances.iter().fold(0usize, |acc, &d| gcd(acc, d));
    debug!(distances = distances.len(), gcd = folded, "kasiski examination");
    Ok(match folded {
        0 => BTreeSet::new(),
        g if config.expand_divisors && g > 1 => (2..=g).filter(|d| g % d == 0).collect(),
        g => BTreeSet::from([g]),
    })
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Unrounded Friedman estimate `0.027·N / ((N−1)·IC − 0.038·N + 0.065)`.
///
/// # Errors
/// `DegenerateInput` when the sequence has fewer than two symbols.
pub fn friedman_estimate(seq: &Sequence) -> Result<f64> {
    let ic = index_of_coincidence(seq)?;
    let n = seq.len() as f64;
    Ok(0.027 * n / ((n - 1.0) * ic - 0.038 * n + 0.065))
}

/// Rounded Friedman estimate.
///
/// May be zero, negative or implausibly large on short or low-IC input;
/// callers must sanity-check it. A non-finite estimate is reported as 0.
pub fn friedman_key_length(seq: &Sequence) -> Result<i64> {
    let raw = friedman_estimate(seq)?;
    if !raw.is_finite() {
        return Ok(0);
    }
    Ok(raw.round() as i64)
}

/// Rule for reducing the candidate-length set to one key length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LengthPolicy {
    /// Smallest candidate.
    Minimum,
    /// Smallest candidate whose mean column IC reaches `threshold`, else the
    /// candidate with the highest mean column IC.
    Coincidence {
        /// Mean column IC treated as language-like.
        threshold: f64,
    },
}

impl Default for LengthPolicy {
    fn default() -> Self {
        LengthPolicy::Coincidence { threshold: DEFAULT_COINCIDENCE_THRESHOLD }
    }
}

/// Output of [`KeyLengthEstimator::estimate`].
#[derive(Debug, Clone, PartialEq)]
pub struct KeyLengthEstimate {
    /// Kasiski candidates; empty when nothing repeated.
    pub kasiski: BTreeSet<usize>,
    /// Raw rounded Friedman estimate.
    pub friedman: i64,
    /// Lengths from the column-coincidence scan.
    pub coincidence: BTreeSet<usize>,
    /// Union of the three, with Friedman clamped to `1..=N`.
    pub candidates: BTreeSet<usize>,
}

impl KeyLengthEstimate {
    /// Kasiski candidates, or `InconclusiveEstimate` when no substring repeated.
    pub fn require_kasiski(&self) -> Result<&BTreeSet<usize>> {
        if self.kasiski.is_empty() {
            return Err(VigError::InconclusiveEstimate {
                message: "no repeated substrings at any scanned length; fall back to Friedman or supply more ciphertext"
                    .to_string(),
            });
        }
        Ok(&self.kasiski)
    }

    /// Picks one key length from `candidates` according to `policy`.
    pub fn select(&self, policy: LengthPolicy, ciphertext: &Sequence) -> Result<usize> {
        let smallest = *self.candidates.first().ok_or_else(|| VigError::InconclusiveEstimate {
            message: "candidate length set is empty".to_string(),
        })?;
        let threshold = match policy {
            LengthPolicy::Minimum => return Ok(smallest),
            LengthPolicy::Coincidence { threshold } => threshold,
        };

        let mut best: Option<(usize, f64)> = None;
        for &len in self.candidates.iter().filter(|&&len| len <= ciphertext.len() / 2) {
            let mean_ic = mean_column_coincidence(ciphertext, len)?;
            debug!(len, mean_ic, "candidate length coincidence");
            if mean_ic >= threshold {
                return Ok(len);
            }
            if best.is_none_or(|(_, score)| mean_ic > score) {
                best = Some((len, mean_ic));
            }
        }
        Ok(best.map_or(smallest, |(len, _)| len))
    }
}

/// Combines Kasiski, Friedman and the column-coincidence scan.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyLengthEstimator {
    kasiski: KasiskiConfig,
    scan_max_len: usize,
    coincidence_threshold: f64,
}

impl Default for KeyLengthEstimator {
    fn default() -> Self {
        Self {
            kasiski: KasiskiConfig::default(),
            scan_max_len: 12,
            coincidence_threshold: DEFAULT_COINCIDENCE_THRESHOLD,
        }
    }
}

impl KeyLengthEstimator {
    /// Estimator with default Kasiski bounds, a scan up to length 12 and the
    /// default coincidence threshold.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the Kasiski substring bounds.
    pub fn with_kasiski(mut self, config: KasiskiConfig) -> Self {
        self.kasiski = config;
        self
    }

    /// Longest length tried by the coincidence scan; 0 disables the scan.
    pub fn with_scan_max_len(mut self, scan_max_len: usize) -> Self {
        self.scan_max_len = scan_max_len;
        self
    }

    /// Mean column IC a scanned length must reach to become a candidate.
    pub fn with_coincidence_threshold(mut self, threshold: f64) -> Self {
        self.coincidence_threshold = threshold;
        self
    }

    /// Runs all estimators over `ciphertext`.
    ///
    /// # Errors
    /// `DegenerateInput` when the ciphertext has fewer than two symbols,
    /// `InvalidOperation` for bad Kasiski bounds.
    pub fn estimate(&self, ciphertext: &Sequence) -> Result<KeyLengthEstimate> {
        let n = ciphertext.len();
        let kasiski = kasiski_examination(ciphertext, &self.kasiski)?;
        let friedman = friedman_key_length(ciphertext)?;
        let coincidence = self.coincidence_scan(ciphertext)?;

        let mut candidates: BTreeSet<usize> = kasiski.union(&coincidence).copied().collect();
        candidates.insert(friedman.clamp(1, n as i64) as usize);

        info!(?kasiski, friedman, ?coincidence, ?candidates, "key length estimate");
        Ok(KeyLengthEstimate { kasiski, friedman, coincidence, candidates })
    }

    fn coincidence_scan(&self, ciphertext: &Sequence) -> Result<BTreeSet<usize>> {
        let upper = self.scan_max_len.min(ciphertext.len() / 2);
        let mut accepted = BTreeSet::new();
        let mut best: Option<(usize, f64)> = None;
        for len in 1..=upper {
            let mean_ic = mean_column_coincidence(ciphertext, len)?;
            if mean_ic >= self.coincidence_threshold {
                accepted.insert(len);
            }
            if best.is_none_or(|(_, score)| mean_ic > score) {
                best = Some((len, mean_ic));
            }
        }
        if accepted.is_empty() {
            accepted.extend(best.map(|(len, _)| len));
        }
        Ok(accepted)
    }
}
