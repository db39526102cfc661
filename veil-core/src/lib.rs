//! # veil-core
//!
//! Foundation crate for the Veil de-identification engine.
//! Defines the types, traits, errors, and config shared by every other
//! crate in the workspace.

pub mod config;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::EngineConfig;
pub use errors::{VeilError, VeilResult};
pub use models::{AnonymizedText, DetectedSpan, Replacement};
pub use traits::IRecognizer;
