//! Example: ciphertext-only attack on a Vigenère ciphertext.
//! Encrypts a passage, runs the full pipeline and prints every stage.
//!
//! Run with `RUST_LOG=vigrover=debug` for per-stage tracing output.

use tracing_subscriber::EnvFilter;
use vigrover::{AttackConfig, FrequencyProfile, Key, Sequence, VigError, VigenereAttack};

const PASSAGE: &str = "It was a bright cold day in April and the clocks were striking thirteen. Winston Smith, \
    his chin nuzzled into his breast in an effort to escape the vile wind, slipped quickly through the glass \
    doors of Victory Mansions, though not quickly enough to prevent a swirl of gritty dust from entering along \
    with him. The hallway smelt of boiled cabbage and old rag mats. At one end of it a coloured poster, too \
    large for indoor display, had been tacked to the wall. It depicted simply an enormous face, more than a \
    metre wide: the face of a man of about forty-five, with a heavy black moustache and ruggedly handsome \
    features.";

fn main() -> Result<(), VigError> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    println!("--- vigrover Example: breaking a Vigenère cipher ---");

    let key_text = std::env::args().nth(1).unwrap_or_else(|| "LEMON".to_string());
    let plain: String = PASSAGE.chars().filter(|c| c.is_ascii_alphabetic()).map(|c| c.to_ascii_uppercase()).collect();
    let ciphertext = Key::parse(&key_text)?.encrypt(&Sequence::parse(&plain)?);
    println!("\nCiphertext ({} symbols):\n{}", ciphertext.len(), ciphertext);

    let attack = VigenereAttack::new(FrequencyProfile::english(), AttackConfig::default());
    let report = attack.run(&ciphertext)?;

    println!("\nKey length candidates:");
    println!("  Kasiski:     {:?}", report.lengths.kasiski);
    println!("  Friedman:    {}", report.lengths.friedman);
    println!("  Coincidence: {:?}", report.lengths.coincidence);
    println!("  Selected:    {}", report.key_len);

    println!("\nRecovered key: {} (chi-square {:.2})", report.recovered.key, report.recovered.score);
    println!(
        "Candidates: {} enumerated, {} accepted{}",
        report.candidates.len(),
        report.validity.valid_count(),
        if report.candidates.exhausted { "" } else { " (truncated)" }
    );

    println!(
        "\nSearch: {} rounds, success probability {:.4}",
        report.search.iterations, report.search.success_probability
    );
    println!("{}", report.search.histogram);

    println!("Selected key: {}", report.key);
    println!("Plaintext:\n{}", report.plaintext);
    println!("\n{}", report.benchmark);

    Ok(())
}
