// src/attack/mod.rs

//! End-to-end ciphertext-only attack: key length → key recovery → candidate
//! enumeration → amplified verification → decryption.

use crate::analysis::{
    CandidateConfig, CandidateKeyGenerator, CandidateKeys, KasiskiConfig, KeyLengthEstimate, KeyLengthEstimator,
    KeyRecoverer, LengthPolicy, RecoveredKey, ScoreMode,
};
use crate::benchmark::{CostBenchmark, optimal_iterations};
use crate::core::{FrequencyProfile, Key, Result, Sequence};
use crate::search::{AmplitudeAmplificationSearch, SearchConfig, SearchOutcome, ValidityMap, ValidityOracleBuilder};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Tuning of every pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackConfig {
    /// Kasiski substring bounds.
    pub kasiski: KasiskiConfig,
    /// Longest length tried by the column-coincidence scan.
    pub scan_max_len: usize,
    /// How one key length is picked from the candidates.
    pub length_policy: LengthPolicy,
    /// Candidate enumeration keeps keys scoring below `recovered × candidate_slack`.
    pub candidate_slack: f64,
    /// The oracle marks candidates scoring below `recovered × acceptance_slack`.
    pub acceptance_slack: f64,
    /// Cap on enumerated candidates.
    pub max_candidates: usize,
    /// Scoring rule for enumeration.
    pub score_mode: ScoreMode,
    /// Fixed round count; `None` uses the optimal count for the marked fraction.
    pub iterations: Option<usize>,
    /// Shots, seed, execution mode and width bound of the search.
    pub search: SearchConfig,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            kasiski: KasiskiConfig::default(),
            scan_max_len: 12,
            length_policy: LengthPolicy::default(),
            candidate_slack: 4.0,
            acceptance_slack: 1.25,
            max_candidates: 4096,
            score_mode: ScoreMode::ColumnSum,
            iterations: None,
            search: SearchConfig::default(),
        }
    }
}

/// Every intermediate result of one attack.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackReport {
    /// Output of all length estimators.
    pub lengths: KeyLengthEstimate,
    /// The length chosen by the policy.
    pub key_len: usize,
    /// Per-column chi-square key.
    pub recovered: RecoveredKey,
    /// Enumerated candidate space.
    pub candidates: CandidateKeys,
    /// Oracle marking over the candidate space.
    pub validity: ValidityMap,
    /// Search result.
    pub search: SearchOutcome,
    /// Lowest-scoring valid candidate among the measured outcomes, unless it
    /// scores worse than the recovered key.
    pub selected_index: Option<usize>,
    /// Final key.
    pub key: Key,
    /// Ciphertext decrypted with `key`.
    pub plaintext: Sequence,
    /// Classical versus amplified cost for this candidate space.
    pub benchmark: CostBenchmark,
}

/// Runs the attack pipeline against one ciphertext.
pub struct VigenereAttack {
    profile: FrequencyProfile,
    config: AttackConfig,
}

impl VigenereAttack {
    /// Attack scoring against `profile`.
    pub fn new(profile: FrequencyProfile, config: AttackConfig) -> Self {
        Self { profile, config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &AttackConfig {
        &self.config
    }

    /// Attacks `ciphertext`.
    ///
    /// # Errors
    /// Anything the stages raise: short input, bad configuration, an index
    /// space wider than the search allows.
    pub fn run(&self, ciphertext: &Sequence) -> Result<AttackReport> {
        let lengths = KeyLengthEstimator::new()
            .with_kasiski(self.config.kasiski)
            .with_scan_max_len(self.config.scan_max_len)
            .estimate(ciphertext)?;
        let key_len = lengths.select(self.config.length_policy, ciphertext)?;
        info!(key_len, policy = ?self.config.length_policy, "key length selected");

        let recovered = KeyRecoverer::new(&self.profile).recover(ciphertext, key_len)?;

        let candidate_config = CandidateConfig {
            key_len,
            threshold: (recovered.score * self.config.candidate_slack).max(f64::MIN_POSITIVE),
            mode: self.config.score_mode,
            max_candidates: Some(self.config.max_candidates),
        };
        let candidates = CandidateKeyGenerator::new(&self.profile, candidate_config)
            .with_required_key(recovered.key.clone())
            .generate(ciphertext)?;
        if !candidates.exhausted {
            warn!(kept = candidates.len(), "candidate space truncated");
        }
        let recovered_score = candidates
            .position(&recovered.key)
            .and_then(|index| candidates.candidates.get(index))
            .map_or(recovered.score, |candidate| candidate.score);

        let acceptance = (recovered_score * self.config.acceptance_slack).max(f64::MIN_POSITIVE);
        let validity = ValidityMap::from_scores(&candidates.scores(), acceptance);
        let oracle = ValidityOracleBuilder::new()
            .with_max_index_bits(self.config.search.max_index_bits)
            .build(&validity)?;

        let dim = 1usize << oracle.num_bits();
        let iterations = self.config.iterations.unwrap_or_else(|| optimal_iterations(dim, validity.valid_count()));
        let search_config = SearchConfig { iterations, ..self.config.search };
        let search = AmplitudeAmplificationSearch::new(oracle, search_config)?.run()?;

        let selected_index = search
            .histogram
            .counts()
            .keys()
            .filter_map(|&outcome| usize::try_from(outcome).ok())
            .filter(|&index| validity.is_valid(index))
            .filter_map(|index| candidates.candidates.get(index).map(|candidate| (index, candidate.score)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .filter(|&(_, score)| score <= recovered_score)
            .map(|(index, _)| index);
        let key = match selected_index.and_then(|index| candidates.key(index)) {
            Some(key) => key.clone(),
            None => {
                warn!(recovered = %recovered.key, "search selected no valid candidate, keeping recovered key");
                recovered.key.clone()
            }
        };
        let plaintext = key.decrypt(ciphertext);
        let benchmark = CostBenchmark::for_candidates(candidates.len());
        info!(%key, candidates = candidates.len(), valid = validity.valid_count(), "attack finished");

        Ok(AttackReport {
            lengths,
            key_len,
            recovered,
            candidates,
            validity,
            search,
            selected_index,
            key,
            plaintext,
            benchmark,
        })
    }
}
