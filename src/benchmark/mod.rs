// src/benchmark/mod.rs

//! Oracle-call costs of classical scanning versus amplitude amplification.

use crate::core::PI;
use serde::Serialize;
use std::fmt;

/// Worst-case checks of a linear scan over `n` candidates.
pub fn classical_checks(n: usize) -> usize {
    n
}

/// Expected checks of a linear scan for a single valid candidate: `ceil(n/2)`.
pub fn classical_expected_checks(n: usize) -> usize {
    n.div_ceil(2)
}

/// Oracle calls of amplitude amplification over `n` candidates: `ceil((π/4)·√n)`.
pub fn amplification_oracle_calls(n: usize) -> usize {
    (PI / 4.0 * (n as f64).sqrt()).ceil() as usize
}

/// Rounds maximising the marked mass for `marked` of `dim` indices.
///
/// `max(1, round((π/4)/asin(√(M/dim)) − 0.5))`; 0 when nothing is marked or
/// everything is, since no rotation helps there.
pub fn optimal_iterations(dim: usize, marked: usize) -> usize {
    if marked == 0 || marked >= dim {
        return 0;
    }
    let theta = (marked as f64 / dim as f64).sqrt().asin();
    (PI / 4.0 / theta - 0.5).round().max(1.0) as usize
}

/// Cost summary for one candidate-space size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostBenchmark {
    /// Candidate count `N`.
    pub candidates: usize,
    /// See [`classical_checks`].
    pub classical_checks: usize,
    /// See [`classical_expected_checks`].
    pub classical_expected_checks: usize,
    /// See [`amplification_oracle_calls`].
    pub amplification_oracle_calls: usize,
}

impl CostBenchmark {
    /// Costs for a space of `n` candidates.
    pub fn for_candidates(n: usize) -> Self {
        Self {
            candidates: n,
            classical_checks: classical_checks(n),
            classical_expected_checks: classical_expected_checks(n),
            amplification_oracle_calls: amplification_oracle_calls(n),
        }
    }

    /// `classical_checks / amplification_oracle_calls`, 0 for an empty space.
    pub fn speedup(&self) -> f64 {
        if self.amplification_oracle_calls == 0 {
            return 0.0;
        }
        self.classical_checks as f64 / self.amplification_oracle_calls as f64
    }
}

impl fmt::Display for CostBenchmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cost for {} candidates:", self.candidates)?;
        writeln!(f, "  classical (worst):    {}", self.classical_checks)?;
        writeln!(f, "  classical (expected): {}", self.classical_expected_checks)?;
        write!(f, "  amplified oracle calls: {} ({:.2}x)", self.amplification_oracle_calls, self.speedup())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_values() {
        assert_eq!(classical_checks(100), 100);
        assert_eq!(classical_expected_checks(7), 4);
        assert_eq!(amplification_oracle_calls(100), 8);
        assert_eq!(amplification_oracle_calls(1), 1);
        assert_eq!(amplification_oracle_calls(0), 0);
    }

    #[test]
    fn test_optimal_iterations() {
        assert_eq!(optimal_iterations(4, 1), 1);
        assert_eq!(optimal_iterations(8, 1), 2);
        assert_eq!(optimal_iterations(1024, 1), 25);
        assert_eq!(optimal_iterations(8, 0), 0);
        assert_eq!(optimal_iterations(8, 8), 0);
    }

    #[test]
    fn test_benchmark_bundle() {
        let bench = CostBenchmark::for_candidates(10_000);
        assert_eq!(bench.amplification_oracle_calls, 79);
        assert!(bench.speedup() > 100.0);
    }
}
