/// Mapping store errors.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    /// merge() found the same original value bound to two different
    /// substitutes (or the same substitute bound to two originals) for
    /// one entity type. The merge is aborted and neither store mutated.
    #[error("mapping conflict for entity type '{entity_type}': '{existing}' and '{incoming}' both claim the same counterpart")]
    Conflict {
        entity_type: String,
        existing: String,
        incoming: String,
    },
}
