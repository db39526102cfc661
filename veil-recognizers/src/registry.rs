//! RecognizerRegistry — the set of active detection rules.

use std::sync::Arc;

use veil_core::errors::VeilResult;
use veil_core::models::DetectedSpan;
use veil_core::traits::IRecognizer;

/// Holds every active recognizer in registration order.
///
/// Registration order matters: the span resolver breaks exact ties in
/// favor of the earliest-registered rule, so iteration here must be
/// stable. Re-registering a name replaces the rule in place, keeping
/// its original position.
#[derive(Default)]
pub struct RecognizerRegistry {
    recognizers: Vec<Arc<dyn IRecognizer>>,
}

impl RecognizerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace (by name) a detection rule.
    pub fn register(&mut self, recognizer: Arc<dyn IRecognizer>) {
        if let Some(slot) = self
            .recognizers
            .iter_mut()
            .find(|r| r.name() == recognizer.name())
        {
            *slot = recognizer;
        } else {
            self.recognizers.push(recognizer);
        }
    }

    /// Remove a recognizer. Other rules for the same entity type, if
    /// any, remain active. Returns whether a rule was removed.
    pub fn unregister(&mut self, name: &str) -> bool {
        let before = self.recognizers.len();
        self.recognizers.retain(|r| r.name() != name);
        self.recognizers.len() != before
    }

    pub fn len(&self) -> usize {
        self.recognizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recognizers.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.recognizers.iter().map(|r| r.name().to_string()).collect()
    }

    /// Run every recognizer against the text and concatenate the spans
    /// in registration order. Any recognizer error aborts detection —
    /// returning spans from the rules that did succeed would hand the
    /// caller partially protected text.
    pub fn detect_all(&self, text: &str) -> VeilResult<Vec<DetectedSpan>> {
        let mut spans = Vec::new();
        for recognizer in &self.recognizers {
            let mut found = recognizer.analyze(text)?;
            tracing::debug!(
                recognizer = recognizer.name(),
                count = found.len(),
                "recognizer pass complete"
            );
            spans.append(&mut found);
        }
        Ok(spans)
    }
}
