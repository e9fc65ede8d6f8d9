// src/core/sequence.rs

use super::constants::vig_constants::ALPHABET_SIZE;
use super::error::{Result, VigError};
use std::fmt;
use std::str::FromStr;

/// An ordered list of alphabet symbols with no separators.
///
/// Symbols are stored as their alphabet position (`A = 0` .. `Z = 25`).
/// Both ciphertext and plaintext are `Sequence`s. Construction guarantees every
/// stored value is a valid alphabet member, so downstream arithmetic can index
/// 26-entry tables without bounds checks failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Sequence {
    symbols: Vec<u8>,
}

impl Sequence {
    /// Parses uppercase text. Anything outside `A..=Z` is rejected;
    /// normalising raw text is the caller's job.
    pub fn parse(text: &str) -> Result<Self> {
        let symbols = text
            .chars()
            .enumerate()
            .map(|(position, symbol)| {
                if symbol.is_ascii_uppercase() {
                    Ok(symbol as u8 - b'A')
                } else {
                    Err(VigError::InvalidSymbol { symbol, position })
                }
            })
            .collect::<Result<Vec<u8>>>()?;
        Ok(Self { symbols })
    }

    /// Builds a sequence from raw symbol values, rejecting values ≥ 26.
    pub fn from_symbols(symbols: Vec<u8>) -> Result<Self> {
        if let Some(position) = symbols.iter().position(|&s| s as usize >= ALPHABET_SIZE) {
            return Err(VigError::InvalidOperation {
                message: format!(
                    "Symbol value {} at position {} is outside the {}-letter alphabet",
                    symbols[position], position, ALPHABET_SIZE
                ),
            });
        }
        Ok(Self { symbols })
    }

    /// Read-only access to the symbol values.
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns `true` if the sequence holds no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Occurrence count of every alphabet symbol.
    pub fn counts(&self) -> [usize; ALPHABET_SIZE] {
        symbol_counts(self.symbols.iter().copied())
    }

    /// Symbols at positions `offset, offset + stride, offset + 2·stride, …`.
    ///
    /// Panics if `stride` is zero; callers validate key lengths first.
    pub fn column(&self, offset: usize, stride: usize) -> Sequence {
        Sequence {
            symbols: self.symbols.iter().skip(offset).step_by(stride).copied().collect(),
        }
    }

    /// Splits into `stride` interleaved columns.
    pub fn columns(&self, stride: usize) -> Vec<Sequence> {
        (0..stride).map(|offset| self.column(offset, stride)).collect()
    }

    pub(crate) fn from_trusted(symbols: Vec<u8>) -> Self {
        Self { symbols }
    }
}

impl FromStr for Sequence {
    type Err = VigError;

    fn from_str(s: &str) -> Result<Self> {
        Sequence::parse(s)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &s in &self.symbols {
            write!(f, "{}", (b'A' + s) as char)?;
        }
        Ok(())
    }
}

/// Tallies symbol values into a 26-bucket histogram.
pub(crate) fn symbol_counts<I: IntoIterator<Item = u8>>(symbols: I) -> [usize; ALPHABET_SIZE] {
    let mut counts = [0usize; ALPHABET_SIZE];
    for s in symbols {
        counts[s as usize] += 1;
    }
    counts
}

/// A Vigenère key: a non-empty sequence of shifts applied cyclically.
///
/// Ciphertext position `i` is combined with key symbol `i mod L`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key {
    shifts: Vec<u8>,
}

impl Key {
    /// Parses an uppercase key such as `"LEMON"`.
    pub fn parse(text: &str) -> Result<Self> {
        let sequence = Sequence::parse(text)?;
        Self::from_shifts(sequence.symbols)
    }

    /// Builds a key from shift values (`0..26`). Empty keys are rejected.
    pub fn from_shifts(shifts: Vec<u8>) -> Result<Self> {
        if shifts.is_empty() {
            return Err(VigError::InvalidKeyLength { requested: 0, sequence_len: 0 });
        }
        let checked = Sequence::from_symbols(shifts)?;
        Ok(Self { shifts: checked.symbols })
    }

    /// The shift values.
    pub fn shifts(&self) -> &[u8] {
        &self.shifts
    }

    /// Key length `L` (always ≥ 1).
    pub fn len(&self) -> usize {
        self.shifts.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }

    /// `c_i = (p_i + k_{i mod L}) mod 26`
    pub fn encrypt(&self, plaintext: &Sequence) -> Sequence {
        self.combine(plaintext, |p, k| (p + k) % ALPHABET_SIZE as u8)
    }

    /// `p_i = (c_i − k_{i mod L}) mod 26`
    pub fn decrypt(&self, ciphertext: &Sequence) -> Sequence {
        self.combine(ciphertext, |c, k| (c + ALPHABET_SIZE as u8 - k) % ALPHABET_SIZE as u8)
    }

    fn combine(&self, input: &Sequence, op: impl Fn(u8, u8) -> u8) -> Sequence {
        let symbols = input
            .symbols
            .iter()
            .zip(self.shifts.iter().cycle())
            .map(|(&s, &k)| op(s, k))
            .collect();
        Sequence::from_trusted(symbols)
    }
}

impl FromStr for Key {
    type Err = VigError;

    fn from_str(s: &str) -> Result<Self> {
        Key::parse(s)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &s in &self.shifts {
            write!(f, "{}", (b'A' + s) as char)?;
        }
        Ok(())
    }
}
