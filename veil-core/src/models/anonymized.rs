use serde::{Deserialize, Serialize};

/// Result of anonymization with metadata about what was substituted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizedText {
    /// The text with every resolved span replaced.
    pub text: String,
    /// One record per substituted span, in document order.
    pub replacements: Vec<Replacement>,
}

/// A single substitution applied during anonymization.
///
/// Offsets locate the substitute in the OUTPUT text, so audit tooling
/// can highlight what was replaced without access to the originals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Replacement {
    pub entity_type: String,
    pub substituted: String,
    pub start: usize,
    pub end: usize,
    pub score: f64,
}
