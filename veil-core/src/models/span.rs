use serde::{Deserialize, Serialize};

/// A candidate sensitive span produced by a recognizer.
///
/// Offsets are byte offsets into the analyzed text. Spans are transient:
/// they live from detection through resolution and substitution within
/// one anonymize() call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedSpan {
    /// Byte offset of the first matched byte.
    pub start: usize,
    /// Byte offset one past the last matched byte.
    pub end: usize,
    /// Category label, e.g. "PERSON", "CREDIT_CARD".
    pub entity_type: String,
    /// Recognizer confidence in [0, 1].
    pub score: f64,
    /// The matched text, owned so spans outlive the borrow of the input.
    pub text: String,
}

impl DetectedSpan {
    pub fn new(
        start: usize,
        end: usize,
        entity_type: impl Into<String>,
        score: f64,
        text: impl Into<String>,
    ) -> Self {
        Self {
            start,
            end,
            entity_type: entity_type.into(),
            score,
            text: text.into(),
        }
    }

    /// Span length in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether two spans share at least one byte.
    pub fn overlaps(&self, other: &DetectedSpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// A span is usable only if it is non-empty, in bounds, and cuts the
    /// text on char boundaries (replace_range panics otherwise).
    pub fn is_valid_for(&self, text: &str) -> bool {
        !self.is_empty()
            && self.end <= text.len()
            && text.is_char_boundary(self.start)
            && text.is_char_boundary(self.end)
    }
}
