use serde::{Deserialize, Serialize};

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// When true, entity types without an explicit operator override get
    /// synthetic substitutes instead of `<TYPE>` placeholders.
    pub synthetic_mode: bool,
    /// Fixed RNG seed for reproducible synthetic generation. None means
    /// fresh entropy per engine instance.
    pub seed: Option<u64>,
    /// Register the builtin pattern recognizers at construction.
    pub builtin_recognizers: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            synthetic_mode: false,
            seed: None,
            builtin_recognizers: true,
        }
    }
}
