//! Reverse substitution — restore originals in downstream text.
//!
//! Substituted values can be substrings of one another (`<PERSON>` sits
//! inside `<PERSON_2>`), so matching is longest-first at every
//! position. This is a correctness hazard, not a cosmetic detail: a
//! prefix match would splice `John Doe` into the middle of the
//! `<PERSON_2>` token. Unmatched text passes through unchanged, which
//! is expected when an intermediate generative step paraphrased the
//! surroundings — deanonymization is best-effort by design.

use crate::mapping::MappingStore;

/// Replace every recorded substitute occurring in `text` with its
/// original value. Never fails, never mutates the store.
pub fn restore(text: &str, mapping: &MappingStore) -> String {
    let mut pairs = mapping.substitution_pairs();
    if pairs.is_empty() {
        return text.to_string();
    }
    // Longest substitute first; lexicographic second so the scan order
    // is fully deterministic when lengths tie.
    pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(b.0)));

    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < text.len() {
        let rest = &text[i..];
        let hit = pairs
            .iter()
            .find(|(sub, _)| rest.starts_with(sub) && token_bounded(text, i, i + sub.len()));
        match hit {
            Some((sub, original)) => {
                out.push_str(original);
                i += sub.len();
            }
            None => {
                let Some(ch) = rest.chars().next() else { break };
                out.push(ch);
                i += ch.len_utf8();
            }
        }
    }
    out
}

/// Whole-token check: an alphanumeric-edged substitute must not sit
/// flush against alphanumeric context ("Jane Roe" inside "Jane Roeland"
/// is not a match). Placeholders are angle-bracketed, so they pass
/// trivially.
fn token_bounded(text: &str, start: usize, end: usize) -> bool {
    let sub = &text[start..end];
    let first_alnum = sub.chars().next().is_some_and(|c| c.is_alphanumeric());
    let last_alnum = sub.chars().next_back().is_some_and(|c| c.is_alphanumeric());

    if first_alnum {
        if let Some(prev) = text[..start].chars().next_back() {
            if prev.is_alphanumeric() {
                return false;
            }
        }
    }
    if last_alnum {
        if let Some(next) = text[end..].chars().next() {
            if next.is_alphanumeric() {
                return false;
            }
        }
    }
    true
}
