use regex::Regex;

use veil_core::errors::{DetectionError, VeilResult};
use veil_core::models::DetectedSpan;
use veil_core::traits::IRecognizer;

/// A regex-backed detection rule with a fixed confidence score.
///
/// Immutable once built; the registry replaces by name when a caller
/// re-registers.
pub struct PatternRecognizer {
    name: String,
    entity_type: String,
    regex: Regex,
    score: f64,
}

impl PatternRecognizer {
    /// Compile a pattern recognizer. Rejects invalid regexes up front so
    /// a bad rule can never silently detect nothing at anonymize time.
    pub fn new(
        name: impl Into<String>,
        entity_type: impl Into<String>,
        pattern: &str,
        score: f64,
    ) -> VeilResult<Self> {
        let name = name.into();
        let regex = Regex::new(pattern).map_err(|e| DetectionError::InvalidPattern {
            name: name.clone(),
            source: Box::new(e),
        })?;
        Ok(Self {
            name,
            entity_type: entity_type.into(),
            regex,
            score: score.clamp(0.0, 1.0),
        })
    }

    /// Build from an already-compiled regex (used by the builtin table).
    pub fn from_regex(
        name: impl Into<String>,
        entity_type: impl Into<String>,
        regex: Regex,
        score: f64,
    ) -> Self {
        Self {
            name: name.into(),
            entity_type: entity_type.into(),
            regex,
            score: score.clamp(0.0, 1.0),
        }
    }

    pub fn score(&self) -> f64 {
        self.score
    }
}

impl IRecognizer for PatternRecognizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn entity_type(&self) -> &str {
        &self.entity_type
    }

    fn analyze(&self, text: &str) -> VeilResult<Vec<DetectedSpan>> {
        let spans = self
            .regex
            .find_iter(text)
            .map(|m| {
                DetectedSpan::new(
                    m.start(),
                    m.end(),
                    self.entity_type.clone(),
                    self.score,
                    m.as_str(),
                )
            })
            .collect();
        Ok(spans)
    }
}
