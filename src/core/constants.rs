//! Constants shared by the statistical and simulation code.

/// Constants for the Vigenère alphabet and the English reference language.
pub mod vig_constants {
    /// Number of symbols in the alphabet (uppercase Latin letters).
    pub const ALPHABET_SIZE: usize = 26;

    /// Relative letter frequencies of English text, `A` through `Z`.
    pub const ENGLISH_FREQUENCIES: [f64; ALPHABET_SIZE] = [
        0.08167, 0.01492, 0.02782, 0.04253, 0.12702, 0.02228, 0.02015, 0.06094,
        0.06966, 0.00153, 0.00772, 0.04025, 0.02406, 0.06749, 0.07507, 0.01929,
        0.00095, 0.05987, 0.06327, 0.09056, 0.02758, 0.00978, 0.02360, 0.00150,
        0.01974, 0.00074,
    ];

    /// Index of coincidence of typical English text.
    pub const ENGLISH_COINCIDENCE: f64 = 0.0667;

    /// Index of coincidence of uniformly random text over the alphabet.
    pub const RANDOM_COINCIDENCE: f64 = 1.0 / ALPHABET_SIZE as f64;

    /// Mean column IC above which a column split is treated as language-like.
    /// Sits between [`RANDOM_COINCIDENCE`] and [`ENGLISH_COINCIDENCE`].
    pub const DEFAULT_COINCIDENCE_THRESHOLD: f64 = 0.055;

    /// Allowed deviation of a frequency profile's total from 1.0.
    pub const PROFILE_SUM_TOLERANCE: f64 = 1e-3;

    /// Default bound on index bits for amplitude-vector materialisation (2^20 amplitudes).
    pub const DEFAULT_MAX_INDEX_BITS: u32 = 20;

    /// Absolute bound on index bits; configured limits are clamped to this.
    pub const HARD_MAX_INDEX_BITS: u32 = 30;

    /// Used for amplitude-amplification iteration counts.
    pub const PI: f64 = std::f64::consts::PI;
}
