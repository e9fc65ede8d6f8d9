// tests/attack_tests.rs

use std::collections::BTreeSet;
use vigrover::analysis::{KasiskiConfig, kasiski_examination};
use vigrover::{
    AttackConfig, ExecutionMode, FrequencyProfile, Key, KeyLengthEstimator, KeyRecoverer, LengthPolicy, SearchConfig,
    Sequence, VigError, VigenereAttack,
};

const ORWELL: &str = "It was a bright cold day in April and the clocks were striking thirteen. Winston Smith, \
    his chin nuzzled into his breast in an effort to escape the vile wind, slipped quickly through the glass \
    doors of Victory Mansions, though not quickly enough to prevent a swirl of gritty dust from entering along \
    with him. The hallway smelt of boiled cabbage and old rag mats. At one end of it a coloured poster, too \
    large for indoor display, had been tacked to the wall. It depicted simply an enormous face, more than a \
    metre wide: the face of a man of about forty-five, with a heavy black moustache and ruggedly handsome \
    features. Winston made for the stairs. It was no use trying the lift. Even at the best of times it was \
    seldom working, and at present the electric current was cut off during daylight hours. It was part of \
    the economy drive in preparation for Hate Week.";

const DICKENS: &str = "It was the best of times, it was the worst of times, it was the age of wisdom, it was the \
    age of foolishness, it was the epoch of belief, it was the epoch of incredulity, it was the season of Light, \
    it was the season of Darkness, it was the spring of hope, it was the winter of despair, we had everything \
    before us, we had nothing before us.";

// Helper: strip everything but letters and uppercase
fn letters(text: &str) -> Result<Sequence, VigError> {
    let cleaned: String = text.chars().filter(|c| c.is_ascii_alphabetic()).map(|c| c.to_ascii_uppercase()).collect();
    Sequence::parse(&cleaned)
}

fn encrypted(key: &str) -> Result<(Sequence, Sequence), VigError> {
    let plain = letters(ORWELL)?;
    let cipher = Key::parse(key)?.encrypt(&plain);
    Ok((plain, cipher))
}

#[test]
fn test_periodic_plaintext_kasiski_and_recovery() -> Result<(), VigError> {
    let plain: String = "ATTACKATDAWN".repeat(20).chars().take(240).collect();
    let cipher = Key::parse("LEMON")?.encrypt(&Sequence::parse(&plain)?);

    // Plaintext period 12 and key period 5 repeat every 60 symbols.
    let kasiski = kasiski_examination(&cipher, &KasiskiConfig::default())?;
    assert_eq!(kasiski, BTreeSet::from([60]));
    let expanded = kasiski_examination(&cipher, &KasiskiConfig { expand_divisors: true, ..KasiskiConfig::default() })?;
    assert!(expanded.contains(&5), "kasiski divisors {:?}", expanded);

    let estimate = KeyLengthEstimator::new().estimate(&cipher)?;
    assert!(estimate.candidates.contains(&5), "candidates {:?}", estimate.candidates);

    let profile = FrequencyProfile::english();
    let recovered = KeyRecoverer::new(&profile).recover(&cipher, 5)?;
    assert_eq!(recovered.key.to_string(), "LEMON");
    assert_eq!(recovered.key.decrypt(&cipher).to_string(), plain);
    Ok(())
}

#[test]
fn test_english_passage_length_estimate() -> Result<(), VigError> {
    let (_, cipher) = encrypted("LEMON")?;
    let estimate = KeyLengthEstimator::new().estimate(&cipher)?;
    assert!(estimate.candidates.contains(&5), "candidates {:?}", estimate.candidates);
    assert_eq!(estimate.select(LengthPolicy::default(), &cipher)?, 5);
    Ok(())
}

#[test]
fn test_attack_recovers_lemon() -> Result<(), VigError> {
    let (plain, cipher) = encrypted("LEMON")?;
    let report = VigenereAttack::new(FrequencyProfile::english(), AttackConfig::default()).run(&cipher)?;

    assert_eq!(report.key_len, 5);
    assert_eq!(report.recovered.key.to_string(), "LEMON");
    assert_eq!(report.key.to_string(), "LEMON");
    assert_eq!(report.plaintext, plain);

    let lemon_index = report.candidates.position(&report.key);
    assert!(lemon_index.is_some());
    assert_eq!(report.selected_index, lemon_index);
    assert_eq!(report.validity.valid_count(), 1);
    assert!(report.search.success_probability > 0.99);
    assert_eq!(report.benchmark.candidates, report.candidates.len());
    Ok(())
}

#[test]
fn test_attack_recovers_longer_keys() -> Result<(), VigError> {
    for key in ["CRYPTO", "QUANTUM"] {
        let (plain, cipher) = encrypted(key)?;
        let report = VigenereAttack::new(FrequencyProfile::english(), AttackConfig::default()).run(&cipher)?;
        assert_eq!(report.key_len, key.len(), "key {}", key);
        assert_eq!(report.key.to_string(), key);
        assert_eq!(report.plaintext, plain);
        assert!(report.search.success_probability > 0.9, "key {}: {}", key, report.search.success_probability);
    }
    Ok(())
}

#[test]
fn test_truncated_candidate_space_keeps_recovered_key() -> Result<(), VigError> {
    // 90 symbols: the lexicographic cut at 4096 candidates falls long before "LEMON".
    let plain = Sequence::from_symbols(letters(DICKENS)?.symbols()[..90].to_vec())?;
    let cipher = Key::parse("LEMON")?.encrypt(&plain);
    let report = VigenereAttack::new(FrequencyProfile::english(), AttackConfig::default()).run(&cipher)?;

    assert!(!report.candidates.exhausted);
    assert_eq!(report.recovered.key.to_string(), "LEMON");
    assert!(report.candidates.position(&report.recovered.key).is_some());
    assert_eq!(report.key.to_string(), "LEMON");
    assert_eq!(report.plaintext, plain);
    Ok(())
}

#[test]
fn test_selected_key_never_scores_worse_than_recovered() -> Result<(), VigError> {
    // Short texts leave "HOG" inside the acceptance band next to "DOG".
    for len in [40, 60] {
        let plain = Sequence::from_symbols(letters(DICKENS)?.symbols()[..len].to_vec())?;
        let cipher = Key::parse("DOG")?.encrypt(&plain);
        let report = VigenereAttack::new(FrequencyProfile::english(), AttackConfig::default()).run(&cipher)?;

        assert!(report.validity.valid_count() >= 2, "len {}: {} valid", len, report.validity.valid_count());
        assert_eq!(report.key.to_string(), "DOG", "len {}", len);
        if let Some(index) = report.selected_index {
            assert!(report.candidates.candidates[index].score <= report.recovered.score);
        }
        assert_eq!(report.plaintext, plain);
    }
    Ok(())
}

#[test]
fn test_attack_gate_level_agrees() -> Result<(), VigError> {
    let (_, cipher) = encrypted("CRYPTO")?;
    let config = AttackConfig {
        search: SearchConfig { execution: ExecutionMode::GateLevel, seed: Some(11), ..SearchConfig::default() },
        ..AttackConfig::default()
    };
    let report = VigenereAttack::new(FrequencyProfile::english(), config).run(&cipher)?;
    assert_eq!(report.key.to_string(), "CRYPTO");
    Ok(())
}

#[test]
fn test_attack_with_single_candidate_keeps_recovered_key() -> Result<(), VigError> {
    // One candidate in a 1-bit space: the search cannot beat 1/2, and an
    // outcome on the padding index falls back to the recovered key.
    let (_, cipher) = encrypted("KEY")?;
    let report = VigenereAttack::new(FrequencyProfile::english(), AttackConfig::default()).run(&cipher)?;
    assert_eq!(report.key.to_string(), "KEY");
    assert_eq!(report.candidates.len(), 1);
    assert!((report.search.success_probability - 0.5).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_attack_width_bound() -> Result<(), VigError> {
    let (_, cipher) = encrypted("QUANTUM")?;
    let config = AttackConfig {
        search: SearchConfig { max_index_bits: 2, ..SearchConfig::default() },
        ..AttackConfig::default()
    };
    let result = VigenereAttack::new(FrequencyProfile::english(), config).run(&cipher);
    assert!(matches!(result, Err(VigError::IndexSpaceOverflow { max_bits: 2, .. })));
    Ok(())
}

#[test]
fn test_attack_rejects_degenerate_input() -> Result<(), VigError> {
    let attack = VigenereAttack::new(FrequencyProfile::english(), AttackConfig::default());
    assert!(matches!(attack.run(&Sequence::parse("Q")?), Err(VigError::DegenerateInput { .. })));
    Ok(())
}
