//! Span resolver — turns the union of recognizer output into an
//! ordered, non-overlapping span list.
//!
//! The resolution order is total and deterministic, which is what makes
//! anonymization reproducible for a fixed recognizer set and input:
//! on overlap the higher score wins, then the longer span, then the
//! span from the earliest-registered recognizer.

use veil_core::models::DetectedSpan;

/// Resolve overlapping candidates.
///
/// `spans` must be the concatenation of recognizer results in
/// registration order (what `RecognizerRegistry::detect_all` returns);
/// the stable sort below then makes "earliest registered" the final
/// tie-break. Zero-length, out-of-bounds, and non-char-boundary spans
/// are discarded with a warning, never an error — one misbehaving
/// recognizer must not take down the call.
pub fn resolve_spans(text: &str, spans: Vec<DetectedSpan>) -> Vec<DetectedSpan> {
    let mut candidates: Vec<DetectedSpan> = spans
        .into_iter()
        .filter(|s| {
            if s.is_valid_for(text) {
                true
            } else {
                tracing::warn!(
                    start = s.start,
                    end = s.end,
                    entity_type = %s.entity_type,
                    "discarding malformed span from recognizer"
                );
                false
            }
        })
        .collect();

    // Stable: equal starts keep registration order.
    candidates.sort_by_key(|s| s.start);

    let mut resolved: Vec<DetectedSpan> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        match resolved.last() {
            Some(last) if candidate.overlaps(last) => {
                if beats(&candidate, last) {
                    resolved.pop();
                    resolved.push(candidate);
                }
                // Otherwise the earlier span stands and the candidate is dropped.
            }
            _ => resolved.push(candidate),
        }
    }

    tracing::debug!(kept = resolved.len(), "span resolution complete");
    resolved
}

/// Whether `challenger` displaces an overlapping, already-kept span.
/// Score first, then length; an exact tie keeps the incumbent, which
/// is the earlier span in the stable order.
fn beats(challenger: &DetectedSpan, incumbent: &DetectedSpan) -> bool {
    if challenger.score != incumbent.score {
        return challenger.score > incumbent.score;
    }
    challenger.len() > incumbent.len()
}
