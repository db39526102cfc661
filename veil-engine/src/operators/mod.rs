//! Operator dispatch — entity type → substitution strategy.

pub mod synthetic;

use std::collections::HashMap;
use std::sync::Arc;

use rand::rngs::StdRng;

use veil_core::errors::{OperatorError, VeilResult};

/// Caller-supplied generator: original value in, substitute out.
/// Treated as an opaque, pure, potentially-fallible external call.
pub type GeneratorFn = Arc<dyn Fn(&str) -> anyhow::Result<String> + Send + Sync>;

/// Substitution strategy for one entity type.
#[derive(Clone)]
pub enum Operator {
    /// Stable, traceable marker: `<TYPE>` for the first distinct value
    /// of a type, `<TYPE_2>`, `<TYPE_3>`, … for subsequent ones.
    Placeholder,
    /// Plausible fabricated value of the same general shape, drawn from
    /// the engine RNG (reproducible under a fixed seed).
    Synthetic,
    /// Caller-supplied generator function.
    Custom(GeneratorFn),
    /// No substitution; the span is left as-is and never mapped.
    Keep,
}

impl Operator {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        Operator::Custom(Arc::new(f))
    }
}

impl std::fmt::Debug for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operator::Placeholder => f.write_str("Placeholder"),
            Operator::Synthetic => f.write_str("Synthetic"),
            Operator::Custom(_) => f.write_str("Custom(..)"),
            Operator::Keep => f.write_str("Keep"),
        }
    }
}

/// Per-type operator overrides plus the process-wide default mode.
#[derive(Debug, Default)]
pub struct OperatorRegistry {
    overrides: HashMap<String, Operator>,
    synthetic_default: bool,
}

impl OperatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the substitution strategy for one entity type.
    pub fn set_operator(&mut self, entity_type: impl Into<String>, operator: Operator) {
        self.overrides.insert(entity_type.into(), operator);
    }

    /// Switch between placeholder mode and synthetic mode for every
    /// entity type without an explicit override.
    pub fn set_default_mode(&mut self, enable_synthetic: bool) {
        self.synthetic_default = enable_synthetic;
    }

    pub fn synthetic_default(&self) -> bool {
        self.synthetic_default
    }

    /// The operator that applies to an entity type.
    pub fn resolve(&self, entity_type: &str) -> Operator {
        match self.overrides.get(entity_type) {
            Some(op) => op.clone(),
            None if self.synthetic_default => Operator::Synthetic,
            None => Operator::Placeholder,
        }
    }
}

/// Inputs an operator application may draw on, beyond the original value.
pub struct SubstitutionContext<'a> {
    pub entity_type: &'a str,
    /// How many distinct originals of this type already have substitutes
    /// (store plus the current call's staged entries). Zero-based.
    pub distinct_index: usize,
    pub rng: &'a mut StdRng,
}

/// Apply an operator to one original value.
///
/// `Keep` yields `None` (the span is skipped entirely). Every other
/// variant yields the substitute to record. Generator failures surface
/// as [`OperatorError`]; the engine turns any of them into a failure of
/// the whole anonymize() call.
pub fn apply(
    operator: &Operator,
    original: &str,
    ctx: &mut SubstitutionContext<'_>,
) -> VeilResult<Option<String>> {
    match operator {
        Operator::Keep => Ok(None),
        Operator::Placeholder => Ok(Some(placeholder_label(
            ctx.entity_type,
            ctx.distinct_index,
        ))),
        Operator::Synthetic => Ok(Some(synthetic::generate(ctx.entity_type, original, ctx.rng))),
        Operator::Custom(f) => {
            let substituted = f(original).map_err(|e| OperatorError::GeneratorFailed {
                entity_type: ctx.entity_type.to_string(),
                reason: e.to_string(),
            })?;
            if substituted.is_empty() {
                return Err(OperatorError::EmptySubstitute {
                    entity_type: ctx.entity_type.to_string(),
                }
                .into());
            }
            Ok(Some(substituted))
        }
    }
}

/// `<TYPE>` for the first distinct value, `<TYPE_n>` from the second on.
fn placeholder_label(entity_type: &str, distinct_index: usize) -> String {
    if distinct_index == 0 {
        format!("<{entity_type}>")
    } else {
        format!("<{entity_type}_{}>", distinct_index + 1)
    }
}
