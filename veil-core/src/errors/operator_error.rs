/// Operator subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum OperatorError {
    #[error("generator for entity type '{entity_type}' failed on a value: {reason}")]
    GeneratorFailed { entity_type: String, reason: String },

    #[error("generator for entity type '{entity_type}' returned an empty substitute")]
    EmptySubstitute { entity_type: String },
}
