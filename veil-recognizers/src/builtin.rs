//! Builtin starter patterns for common sensitive-value shapes.
//!
//! Locale-specific IDs (tax numbers, national registries) are expected
//! to be registered by the caller; this table only covers shapes that
//! are stable across deployments.

use regex::Regex;
use std::sync::LazyLock;

use crate::pattern::PatternRecognizer;

/// A builtin detection pattern before it becomes a recognizer.
pub struct BuiltinPattern {
    pub name: &'static str,
    pub entity_type: &'static str,
    pub regex: &'static LazyLock<Option<Regex>>,
    pub score: f64,
}

macro_rules! builtin_pattern {
    ($name:ident, $regex_str:expr) => {
        pub static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// ── Email ──────────────────────────────────────────────────────────────────
builtin_pattern!(
    RE_EMAIL,
    r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}"
);

// ── Phone numbers (international + US formats) ────────────────────────────
builtin_pattern!(
    RE_PHONE,
    r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}"
);

// ── Credit card (Visa, MC, Amex, Discover) ─────────────────────────────────
builtin_pattern!(
    RE_CREDIT_CARD,
    r"\b(?:4\d{3}|5[1-5]\d{2}|3[47]\d{2}|6(?:011|5\d{2}))[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{3,4}\b"
);

// ── SSN ────────────────────────────────────────────────────────────────────
builtin_pattern!(RE_SSN, r"\b\d{3}-\d{2}-\d{4}\b");

// ── IPv4 ───────────────────────────────────────────────────────────────────
builtin_pattern!(
    RE_IPV4,
    r"\b(?:(?:25[0-5]|2[0-4]\d|[01]?\d\d?)\.){3}(?:25[0-5]|2[0-4]\d|[01]?\d\d?)\b"
);

// ── IBAN ───────────────────────────────────────────────────────────────────
builtin_pattern!(
    RE_IBAN,
    r"\b[A-Z]{2}\d{2}[A-Z0-9]{4}\d{7}(?:[A-Z0-9]?\d{0,16})\b"
);

// ── Date (ISO and slash formats) ───────────────────────────────────────────
builtin_pattern!(
    RE_DATE,
    r"\b(?:\d{4}-\d{2}-\d{2}|(?:0[1-9]|1[0-2])[/\-](?:0[1-9]|[12]\d|3[01])[/\-](?:19|20)\d{2})\b"
);

/// All builtin patterns, most specific first.
pub fn all_patterns() -> Vec<BuiltinPattern> {
    vec![
        BuiltinPattern {
            name: "builtin.email",
            entity_type: "EMAIL_ADDRESS",
            regex: &RE_EMAIL,
            score: 0.95,
        },
        BuiltinPattern {
            name: "builtin.ssn",
            entity_type: "US_SSN",
            regex: &RE_SSN,
            score: 0.95,
        },
        BuiltinPattern {
            name: "builtin.credit_card",
            entity_type: "CREDIT_CARD",
            regex: &RE_CREDIT_CARD,
            score: 0.90,
        },
        BuiltinPattern {
            name: "builtin.iban",
            entity_type: "IBAN_CODE",
            regex: &RE_IBAN,
            score: 0.85,
        },
        BuiltinPattern {
            name: "builtin.ipv4",
            entity_type: "IP_ADDRESS",
            regex: &RE_IPV4,
            score: 0.70,
        },
        BuiltinPattern {
            name: "builtin.date",
            entity_type: "DATE",
            regex: &RE_DATE,
            score: 0.75,
        },
        BuiltinPattern {
            name: "builtin.phone",
            entity_type: "PHONE_NUMBER",
            regex: &RE_PHONE,
            score: 0.60,
        },
    ]
}

/// Instantiate the builtin recognizer set.
///
/// A builtin whose regex failed to compile is skipped with a warning
/// rather than poisoning engine construction.
pub fn default_recognizers() -> Vec<PatternRecognizer> {
    all_patterns()
        .into_iter()
        .filter_map(|p| match p.regex.as_ref() {
            Some(re) => Some(PatternRecognizer::from_regex(
                p.name,
                p.entity_type,
                re.clone(),
                p.score,
            )),
            None => {
                tracing::warn!(pattern = p.name, "builtin pattern failed to compile, skipped");
                None
            }
        })
        .collect()
}
