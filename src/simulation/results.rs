// src/simulation/results.rs
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Outcome tallies of repeated measurement of one amplitude vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeasurementHistogram {
    num_bits: u32,
    shots: usize,
    /// Outcome index -> number of shots that produced it. Zero counts are absent.
    counts: BTreeMap<u64, usize>,
}

impl MeasurementHistogram {
    /// Creates an empty histogram. (Internal visibility)
    pub(crate) fn new(num_bits: u32) -> Self {
        Self { num_bits, shots: 0, counts: BTreeMap::new() }
    }

    /// Records one measured outcome. (Internal visibility)
    pub(crate) fn record(&mut self, outcome: u64) {
        *self.counts.entry(outcome).or_insert(0) += 1;
        self.shots += 1;
    }

    /// Width of the measured register.
    pub fn num_bits(&self) -> u32 {
        self.num_bits
    }

    /// Total number of recorded shots.
    pub fn shots(&self) -> usize {
        self.shots
    }

    /// Shots that produced `outcome`.
    pub fn count(&self, outcome: u64) -> usize {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    /// Observed frequency of `outcome`, 0 for an empty histogram.
    pub fn probability(&self, outcome: u64) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.count(outcome) as f64 / self.shots as f64
    }

    /// Returns a reference to the map of all observed outcomes.
    pub fn counts(&self) -> &BTreeMap<u64, usize> {
        &self.counts
    }

    /// The outcome with the highest count. Ties go to the smaller index.
    pub fn most_frequent(&self) -> Option<u64> {
        self.counts
            .iter()
            .fold(None, |best: Option<(u64, usize)>, (&outcome, &count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((outcome, count)),
            })
            .map(|(outcome, _)| outcome)
    }

    /// Fraction of shots whose outcome satisfies `is_success`.
    pub fn success_rate<F>(&self, is_success: F) -> f64
    where
        F: Fn(u64) -> bool,
    {
        if self.shots == 0 {
            return 0.0;
        }
        let hits: usize = self.counts.iter().filter(|(o, _)| is_success(**o)).map(|(_, c)| c).sum();
        hits as f64 / self.shots as f64
    }

    /// Outcomes rendered as fixed-width bit strings, most significant bit first.
    pub fn to_bit_strings(&self) -> BTreeMap<String, usize> {
        self.counts.iter().map(|(&outcome, &count)| (self.bit_string(outcome), count)).collect()
    }

    fn bit_string(&self, outcome: u64) -> String {
        format!("{:0width$b}", outcome, width = self.num_bits as usize)
    }
}

impl fmt::Display for MeasurementHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Measurement Histogram ({} shots, {} bits):", self.shots, self.num_bits)?;
        if self.counts.is_empty() {
            return writeln!(f, "  No outcomes recorded.");
        }
        for (&outcome, &count) in &self.counts {
            writeln!(f, "  |{}> ({}): {}", self.bit_string(outcome), outcome, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tallies_and_ties() {
        let mut hist = MeasurementHistogram::new(3);
        assert_eq!(hist.most_frequent(), None);
        for outcome in [5, 2, 5, 2, 7] {
            hist.record(outcome);
        }
        assert_eq!(hist.shots(), 5);
        assert_eq!(hist.count(5), 2);
        assert_eq!(hist.count(0), 0);
        assert_eq!(hist.most_frequent(), Some(2));
        assert!((hist.probability(7) - 0.2).abs() < 1e-12);
        assert!((hist.success_rate(|o| o >= 5) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_bit_strings_are_msb_first() {
        let mut hist = MeasurementHistogram::new(4);
        hist.record(3);
        hist.record(8);
        let strings = hist.to_bit_strings();
        assert_eq!(strings.get("0011"), Some(&1));
        assert_eq!(strings.get("1000"), Some(&1));
        assert!(hist.to_string().contains("|0011> (3): 1"));
    }
}
