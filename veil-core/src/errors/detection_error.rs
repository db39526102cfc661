/// Detection subsystem errors.
///
/// Any detection failure aborts the whole anonymize() call before a
/// single substitution is applied; partially anonymized text is a leak.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("recognizer '{name}' failed: {reason}")]
    RecognizerFailed { name: String, reason: String },

    #[error("invalid pattern for recognizer '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
