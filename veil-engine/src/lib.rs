//! # veil-engine
//!
//! The core of the Veil de-identification engine: consistent value
//! assignment, operator dispatch, the bidirectional mapping store, and
//! reverse substitution.
//!
//! Detection is delegated to recognizers (see `veil-recognizers`); this
//! crate owns the bookkeeping that makes substitution reversible,
//! consistent across repeated mentions, and safe to run over a whole
//! session of documents.
//!
//! ## Concurrency
//!
//! [`AnonymizerEngine::anonymize`] and every configuration method take
//! `&mut self`; [`AnonymizerEngine::deanonymize`] and the export
//! surface take `&self`. The borrow checker therefore enforces the
//! required discipline directly: one writer at a time, and no reader
//! racing a writer. Hosts sharing one engine across threads wrap it in
//! their own `Mutex`/`RwLock` spanning whole calls.

pub mod deanonymize;
pub mod engine;
pub mod mapping;
pub mod operators;

pub use engine::AnonymizerEngine;
pub use mapping::MappingStore;
pub use operators::{Operator, OperatorRegistry};
