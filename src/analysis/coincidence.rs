// src/analysis/coincidence.rs

use crate::core::{Result, Sequence, VigError};

/// Probability that two symbols drawn without replacement from `seq` match.
///
/// `Σ f_c(f_c − 1) / (N(N − 1))` over the symbol counts `f_c`.
///
/// # Errors
/// `DegenerateInput` when the sequence has fewer than two symbols.
pub fn index_of_coincidence(seq: &Sequence) -> Result<f64> {
    let n = seq.len();
    if n < 2 {
        return Err(VigError::DegenerateInput {
            message: format!("index of coincidence needs at least 2 symbols, got {}", n),
        });
    }
    let matching: usize = seq.counts().iter().map(|&f| f * f.saturating_sub(1)).sum();
    Ok(matching as f64 / (n * (n - 1)) as f64)
}

/// Average index of coincidence of the `len` interleaved columns of `seq`.
///
/// When `len` matches the key length every column is a Caesar shift of
/// plaintext and the average approaches the language's IC; otherwise the
/// columns mix shifts and it falls toward the random-text value.
///
/// # Errors
/// `InvalidKeyLength` for `len == 0`, `DegenerateInput` if any column would
/// hold fewer than two symbols.
pub fn mean_column_coincidence(seq: &Sequence, len: usize) -> Result<f64> {
    if len == 0 {
        return Err(VigError::InvalidKeyLength { requested: 0, sequence_len: seq.len() });
    }
    let columns = seq.columns(len);
    let mut total = 0.0;
    for column in &columns {
        total += index_of_coincidence(column)?;
    }
    Ok(total / len as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_symbol_run_is_one() -> Result<()> {
        assert_eq!(index_of_coincidence(&Sequence::parse("QQQQQQQ")?)?, 1.0);
        assert_eq!(index_of_coincidence(&Sequence::parse("ZZ")?)?, 1.0);
        Ok(())
    }

    #[test]
    fn test_all_distinct_is_zero() -> Result<()> {
        assert_eq!(index_of_coincidence(&Sequence::parse("ABCDEFGHIJKLMNOPQRSTUVWXYZ")?)?, 0.0);
        Ok(())
    }

    #[test]
    fn test_short_input_is_degenerate() -> Result<()> {
        assert!(matches!(index_of_coincidence(&Sequence::parse("A")?), Err(VigError::DegenerateInput { .. })));
        assert!(matches!(index_of_coincidence(&Sequence::default()), Err(VigError::DegenerateInput { .. })));
        Ok(())
    }

    #[test]
    fn test_mixed_counts() -> Result<()> {
        // AAB: pairs (A,A) -> 2*1 = 2 over 3*2 = 6
        let ic = index_of_coincidence(&Sequence::parse("AAB")?)?;
        assert!((ic - 1.0 / 3.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_mean_column_coincidence_of_periodic_columns() -> Result<()> {
        // Columns of length 3 are "AAA" and "BBB".
        let seq = Sequence::parse("ABABAB")?;
        assert_eq!(mean_column_coincidence(&seq, 2)?, 1.0);
        assert!(matches!(mean_column_coincidence(&seq, 4), Err(VigError::DegenerateInput { .. })));
        assert!(matches!(mean_column_coincidence(&seq, 0), Err(VigError::InvalidKeyLength { .. })));
        Ok(())
    }
}
