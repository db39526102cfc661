//! AnonymizerEngine — orchestrates detection, resolution, substitution,
//! and mapping updates.

use std::collections::BTreeMap;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use veil_core::config::EngineConfig;
use veil_core::errors::VeilResult;
use veil_core::models::{AnonymizedText, DetectedSpan, Replacement};
use veil_core::traits::IRecognizer;
use veil_recognizers::builtin::default_recognizers;
use veil_recognizers::resolver::resolve_spans;
use veil_recognizers::{PatternRecognizer, RecognizerRegistry};

use crate::deanonymize;
use crate::mapping::MappingStore;
use crate::operators::{self, Operator, OperatorRegistry, SubstitutionContext};

/// How many times a synthetic generator is re-rolled when it collides
/// with a substitute already assigned to a different original.
const MAX_SYNTHETIC_ATTEMPTS: usize = 16;

/// One de-identification session: recognizer set, operator table,
/// mapping store, and RNG, owned together so independent sessions can
/// coexist in one process.
pub struct AnonymizerEngine {
    recognizers: RecognizerRegistry,
    operators: OperatorRegistry,
    mapping: MappingStore,
    rng: StdRng,
}

impl AnonymizerEngine {
    /// Engine with the default config: builtin recognizers, placeholder
    /// mode, entropy-seeded RNG.
    pub fn new() -> Self {
        Self::from_config(EngineConfig::default())
    }

    pub fn from_config(config: EngineConfig) -> Self {
        let mut recognizers = RecognizerRegistry::new();
        if config.builtin_recognizers {
            for rec in default_recognizers() {
                recognizers.register(Arc::new(rec));
            }
        }
        let mut operators = OperatorRegistry::new();
        operators.set_default_mode(config.synthetic_mode);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            recognizers,
            operators,
            mapping: MappingStore::new(),
            rng,
        }
    }

    // ── Recognizer configuration ──────────────────────────────────────

    /// Add or replace (by name) a pattern-based recognizer.
    pub fn register_recognizer(
        &mut self,
        name: impl Into<String>,
        entity_type: impl Into<String>,
        pattern: &str,
        score: f64,
    ) -> VeilResult<()> {
        let rec = PatternRecognizer::new(name, entity_type, pattern, score)?;
        self.recognizers.register(Arc::new(rec));
        Ok(())
    }

    /// Register any detector, including model-backed ones.
    pub fn register(&mut self, recognizer: Arc<dyn IRecognizer>) {
        self.recognizers.register(recognizer);
    }

    pub fn unregister(&mut self, name: &str) -> bool {
        self.recognizers.unregister(name)
    }

    // ── Operator configuration ────────────────────────────────────────

    pub fn set_operator(&mut self, entity_type: impl Into<String>, operator: Operator) {
        self.operators.set_operator(entity_type, operator);
    }

    /// Switch the default strategy between placeholder and synthetic
    /// mode. A seed, if given, re-seeds the RNG so synthetic output is
    /// reproducible across engine instances.
    pub fn set_mode(&mut self, synthetic: bool, seed: Option<u64>) {
        self.operators.set_default_mode(synthetic);
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
    }

    // ── Anonymization ─────────────────────────────────────────────────

    /// Anonymize, returning just the output text.
    pub fn anonymize(&mut self, text: &str) -> VeilResult<String> {
        self.anonymize_detailed(text).map(|a| a.text)
    }

    /// Anonymize with per-substitution metadata.
    ///
    /// Atomic with respect to the mapping store: new pairs are staged
    /// during the call and committed only once every span has a
    /// substitute. Any recognizer or operator failure returns the error
    /// with the store exactly as it was — partially anonymized output
    /// or half-committed mappings would both be leaks.
    pub fn anonymize_detailed(&mut self, text: &str) -> VeilResult<AnonymizedText> {
        let candidates = self.recognizers.detect_all(text)?;
        let resolved = resolve_spans(text, candidates);

        // (span, substitute) in document order; staged (type, original,
        // substituted) triples awaiting commit.
        let mut substitutions: Vec<(DetectedSpan, String)> = Vec::with_capacity(resolved.len());
        let mut pending: Vec<(String, String, String)> = Vec::new();

        for span in resolved {
            let substituted = match self.assign(&span, &pending)? {
                Some(s) => s,
                None => continue, // Keep operator: span left untouched.
            };
            if let Some(sub) = substituted.new_entry {
                pending.push((span.entity_type.clone(), span.text.clone(), sub));
            }
            substitutions.push((span, substituted.value));
        }

        // Replace from the last span to the first so earlier offsets
        // stay valid while lengths change.
        let mut output = text.to_string();
        for (span, substituted) in substitutions.iter().rev() {
            output.replace_range(span.start..span.end, substituted);
        }

        self.mapping.insert_many(pending)?;

        // Recompute offsets into the output text for the audit trail.
        let mut delta: isize = 0;
        let replacements = substitutions
            .into_iter()
            .map(|(span, substituted)| {
                let start = (span.start as isize + delta) as usize;
                let end = start + substituted.len();
                delta += substituted.len() as isize - span.len() as isize;
                Replacement {
                    entity_type: span.entity_type,
                    substituted,
                    start,
                    end,
                    score: span.score,
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(replacements = replacements.len(), "anonymization complete");
        Ok(AnonymizedText {
            text: output,
            replacements,
        })
    }

    /// Find or create the substitute for one span. Reuse beats
    /// generation: the same original always anonymizes identically
    /// within a session, including repeated mentions inside the call
    /// that first introduces it (via the pending list).
    fn assign(
        &mut self,
        span: &DetectedSpan,
        pending: &[(String, String, String)],
    ) -> VeilResult<Option<Assigned>> {
        if let Some(existing) = self.mapping.lookup(&span.entity_type, &span.text) {
            return Ok(Some(Assigned::reused(existing.to_string())));
        }
        if let Some((_, _, s)) = pending
            .iter()
            .find(|(t, o, _)| *t == span.entity_type && *o == span.text)
        {
            return Ok(Some(Assigned::reused(s.clone())));
        }

        let operator = self.operators.resolve(&span.entity_type);
        let distinct_index = self.mapping.distinct_count(&span.entity_type)
            + pending
                .iter()
                .filter(|(t, _, _)| *t == span.entity_type)
                .count();

        let mut attempts = 0;
        loop {
            let mut ctx = SubstitutionContext {
                entity_type: &span.entity_type,
                distinct_index,
                rng: &mut self.rng,
            };
            let Some(substituted) = operators::apply(&operator, &span.text, &mut ctx)? else {
                return Ok(None);
            };

            let taken = self.mapping.has_substitute(&span.entity_type, &substituted)
                || pending
                    .iter()
                    .any(|(t, _, s)| *t == span.entity_type && *s == substituted);
            if !taken {
                return Ok(Some(Assigned::fresh(substituted)));
            }

            attempts += 1;
            // Only a random generator can produce a different value on
            // retry; placeholders and custom generators are deterministic.
            let retryable = matches!(operator, Operator::Synthetic);
            if !retryable || attempts >= MAX_SYNTHETIC_ATTEMPTS {
                return Err(veil_core::errors::OperatorError::GeneratorFailed {
                    entity_type: span.entity_type.clone(),
                    reason: format!(
                        "substitute '{substituted}' already assigned to a different value"
                    ),
                }
                .into());
            }
        }
    }

    // ── Deanonymization ───────────────────────────────────────────────

    /// Restore original values in downstream text. Best-effort and
    /// infallible: unmatched text passes through unchanged, the store
    /// is never mutated.
    pub fn deanonymize(&self, text: &str) -> String {
        deanonymize::restore(text, &self.mapping)
    }

    // ── Mapping lifecycle ─────────────────────────────────────────────

    /// Drop every recorded pair and restart the per-type placeholder
    /// counters. Call this when the recognizer configuration changes or
    /// a new session begins, so stale mappings can't leak into new output.
    pub fn reset_mapping(&mut self) {
        self.mapping.reset();
    }

    /// Full nested mapping for inspection and auditing.
    pub fn export_mapping(&self) -> BTreeMap<String, BTreeMap<String, String>> {
        self.mapping.export()
    }

    /// Adopt the entries of another store, for cross-document
    /// consistency. Conflicts abort with nothing mutated.
    pub fn merge_mapping(&mut self, other: &MappingStore) -> VeilResult<()> {
        self.mapping.merge(other)?;
        Ok(())
    }

    /// Read access to the session's store (snapshot, serialization).
    pub fn mapping(&self) -> &MappingStore {
        &self.mapping
    }
}

impl Default for AnonymizerEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of assigning a substitute to one span.
struct Assigned {
    value: String,
    /// Set when the value is new this call and must be committed.
    new_entry: Option<String>,
}

impl Assigned {
    fn reused(value: String) -> Self {
        Self {
            value,
            new_entry: None,
        }
    }

    fn fresh(value: String) -> Self {
        Self {
            new_entry: Some(value.clone()),
            value,
        }
    }
}
