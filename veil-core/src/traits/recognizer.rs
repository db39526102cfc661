use crate::errors::VeilResult;
use crate::models::DetectedSpan;

/// A detection rule: given a text, return every candidate sensitive span.
///
/// Implementations range from a regex wrapped in a fixed score to a
/// model-backed NER detector calling out of process. The engine treats
/// them uniformly and only consumes the spans they return; detection
/// accuracy is the recognizer's problem, bookkeeping is the engine's.
pub trait IRecognizer: Send + Sync {
    /// Registry key. Re-registering the same name replaces the rule.
    fn name(&self) -> &str;

    /// The entity type this recognizer labels its spans with.
    fn entity_type(&self) -> &str;

    /// Detect candidate spans. An error here aborts the whole
    /// anonymize() call — a silently skipped recognizer is a leak.
    fn analyze(&self, text: &str) -> VeilResult<Vec<DetectedSpan>>;
}
