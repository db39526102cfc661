//! # veil-recognizers
//!
//! Detection rules for the Veil engine: the recognizer registry, the
//! regex-backed [`PatternRecognizer`], a builtin pattern set, and the
//! span resolver that turns overlapping candidates into an ordered,
//! non-overlapping span list.
//!
//! Detection accuracy is delegated: any `IRecognizer` impl plugs in,
//! including model-backed detectors. This crate only ships the plumbing
//! and a regex starter set.

pub mod builtin;
pub mod pattern;
pub mod registry;
pub mod resolver;

pub use pattern::PatternRecognizer;
pub use registry::RecognizerRegistry;
pub use resolver::resolve_spans;
