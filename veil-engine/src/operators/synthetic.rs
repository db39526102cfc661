//! Builtin synthetic value generation.
//!
//! Substitutes keep the general shape of the entity type — a fake card
//! number still passes a Luhn check, a fake date still parses — so
//! downstream consumers (validators, LLM prompts) treat them like real
//! values. Unknown entity types fall back to shape-preserving noise.

use rand::rngs::StdRng;
use rand::Rng;

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bruno", "Carla", "Derek", "Elena", "Felix", "Greta", "Hugo", "Ingrid", "Jonas",
    "Katya", "Lucas", "Marta", "Nikolai", "Olivia", "Pavel", "Quinn", "Rosa", "Stefan", "Tessa",
];

const LAST_NAMES: &[&str] = &[
    "Andersson", "Bertrand", "Castillo", "Dvorak", "Eriksen", "Fontaine", "Gruber", "Hoffmann",
    "Ivanova", "Jansen", "Kovacs", "Lindqvist", "Moreau", "Novak", "Olsen", "Petrov", "Quintero",
    "Rossi", "Sørensen", "Takacs",
];

const EMAIL_DOMAINS: &[&str] = &[
    "example.com", "example.org", "mail.test", "inbox.test", "post.example",
];

/// Generate a synthetic substitute for one original value.
///
/// Pure in (entity type, original shape, RNG state): a fixed seed
/// reproduces the exact sequence of substitutes.
pub fn generate(entity_type: &str, original: &str, rng: &mut StdRng) -> String {
    match entity_type {
        "PERSON" => fake_person(rng),
        "EMAIL_ADDRESS" => fake_email(rng),
        "PHONE_NUMBER" => fake_phone(rng),
        "CREDIT_CARD" => fake_credit_card(original, rng),
        "US_SSN" => fake_ssn(rng),
        "IBAN_CODE" => fake_iban(rng),
        "IP_ADDRESS" => fake_ip(rng),
        "DATE" => fake_date(rng),
        _ => preserve_shape(original, rng),
    }
}

fn pick<'a>(rng: &mut StdRng, options: &[&'a str]) -> &'a str {
    options[rng.gen_range(0..options.len())]
}

fn fake_person(rng: &mut StdRng) -> String {
    format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES))
}

fn fake_email(rng: &mut StdRng) -> String {
    let first = pick(rng, FIRST_NAMES).to_lowercase();
    let last = pick(rng, LAST_NAMES).to_lowercase();
    format!("{first}.{last}@{}", pick(rng, EMAIL_DOMAINS))
}

fn fake_phone(rng: &mut StdRng) -> String {
    // 555-01XX is the reserved fictional US range.
    format!(
        "({}) 555-01{:02}",
        rng.gen_range(200..990),
        rng.gen_range(0..100)
    )
}

/// Luhn-valid card number, separator style copied from the original.
fn fake_credit_card(original: &str, rng: &mut StdRng) -> String {
    let sep = if original.contains('-') {
        "-"
    } else if original.contains(' ') {
        " "
    } else {
        ""
    };
    let mut digits: Vec<u32> = Vec::with_capacity(16);
    digits.push(4); // Visa-shaped
    for _ in 0..14 {
        digits.push(rng.gen_range(0..10));
    }
    digits.push(luhn_check_digit(&digits));

    digits
        .chunks(4)
        .map(|chunk| chunk.iter().map(|d| d.to_string()).collect::<String>())
        .collect::<Vec<_>>()
        .join(sep)
}

fn luhn_check_digit(digits: &[u32]) -> u32 {
    // Payload is everything before the check digit; doubling starts
    // from the rightmost payload digit.
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 0 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();
    (10 - (sum % 10)) % 10
}

fn fake_ssn(rng: &mut StdRng) -> String {
    format!(
        "{:03}-{:02}-{:04}",
        rng.gen_range(100..900),
        rng.gen_range(10..100),
        rng.gen_range(1000..10000)
    )
}

fn fake_iban(rng: &mut StdRng) -> String {
    format!(
        "DE{:02}{:08}{:010}",
        rng.gen_range(10..100),
        rng.gen_range(10_000_000u32..100_000_000),
        rng.gen_range(1_000_000_000u64..10_000_000_000)
    )
}

fn fake_ip(rng: &mut StdRng) -> String {
    // Documentation range 192.0.2.0/24 (RFC 5737).
    format!("192.0.2.{}", rng.gen_range(1..255))
}

fn fake_date(rng: &mut StdRng) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        rng.gen_range(1950..2020),
        rng.gen_range(1..13),
        rng.gen_range(1..29)
    )
}

/// Fallback for entity types without a dedicated generator: keep the
/// character classes, randomize the content.
fn preserve_shape(original: &str, rng: &mut StdRng) -> String {
    original
        .chars()
        .map(|c| {
            if c.is_ascii_digit() {
                char::from(b'0' + rng.gen_range(0..10u8))
            } else if c.is_ascii_uppercase() {
                char::from(b'A' + rng.gen_range(0..26u8))
            } else if c.is_ascii_lowercase() {
                char::from(b'a' + rng.gen_range(0..26u8))
            } else {
                c
            }
        })
        .collect()
}
