mod anonymized;
mod span;

pub use anonymized::{AnonymizedText, Replacement};
pub use span::DetectedSpan;
