//! MappingStore — the session-scoped bidirectional record connecting
//! original values to their substitutes.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use veil_core::errors::MappingError;

/// Bidirectional original↔substituted record, partitioned by entity type.
///
/// Invariants the store maintains:
/// - forward and inverse maps are always consistent;
/// - per entity type, two distinct originals never share a substitute;
/// - one original keeps the same substitute until [`reset`](Self::reset).
///
/// The store is mutated only by the anonymization engine (insert) and
/// by `reset`/`merge`; deanonymization reads it without mutation.
/// Serde round-trips the whole store for optional session resumption.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MappingStore {
    /// entity type → original → substituted
    forward: HashMap<String, HashMap<String, String>>,
    /// entity type → substituted → original
    inverse: HashMap<String, HashMap<String, String>>,
}

impl MappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The substitute previously assigned to (entity type, original), if any.
    pub fn lookup(&self, entity_type: &str, original: &str) -> Option<&str> {
        self.forward
            .get(entity_type)
            .and_then(|m| m.get(original))
            .map(String::as_str)
    }

    /// Whether a substitute is already claimed within an entity type.
    pub fn has_substitute(&self, entity_type: &str, substituted: &str) -> bool {
        self.inverse
            .get(entity_type)
            .is_some_and(|m| m.contains_key(substituted))
    }

    /// Number of distinct originals recorded for an entity type. Drives
    /// placeholder disambiguation (`<TYPE>`, `<TYPE_2>`, …) and restarts
    /// at zero after reset because entries are never removed otherwise.
    pub fn distinct_count(&self, entity_type: &str) -> usize {
        self.forward.get(entity_type).map_or(0, |m| m.len())
    }

    /// Total number of entries across all entity types.
    pub fn len(&self) -> usize {
        self.forward.values().map(|m| m.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.values().all(|m| m.is_empty())
    }

    /// Insert a batch of (entity type, original, substituted) entries
    /// atomically: every entry is validated against the store and the
    /// rest of the batch before anything is applied, so a conflicting
    /// batch leaves the store untouched. This is what makes a failed
    /// anonymize() call leak-free — its staged entries commit as a unit
    /// or not at all.
    pub fn insert_many<I>(&mut self, entries: I) -> Result<(), MappingError>
    where
        I: IntoIterator<Item = (String, String, String)>,
    {
        let entries: Vec<(String, String, String)> = entries.into_iter().collect();

        for (i, (entity_type, original, substituted)) in entries.iter().enumerate() {
            if let Some(existing) = self.lookup(entity_type, original) {
                if existing != substituted {
                    return Err(MappingError::Conflict {
                        entity_type: entity_type.clone(),
                        existing: existing.to_string(),
                        incoming: substituted.clone(),
                    });
                }
            }
            if let Some(claimed) = self
                .inverse
                .get(entity_type.as_str())
                .and_then(|m| m.get(substituted))
            {
                if claimed != original {
                    return Err(MappingError::Conflict {
                        entity_type: entity_type.clone(),
                        existing: claimed.to_string(),
                        incoming: original.clone(),
                    });
                }
            }
            // Cross-check inside the batch itself, both directions.
            for (other_type, other_orig, other_sub) in &entries[..i] {
                if other_type != entity_type {
                    continue;
                }
                if other_sub == substituted && other_orig != original {
                    return Err(MappingError::Conflict {
                        entity_type: entity_type.clone(),
                        existing: other_orig.clone(),
                        incoming: original.clone(),
                    });
                }
                if other_orig == original && other_sub != substituted {
                    return Err(MappingError::Conflict {
                        entity_type: entity_type.clone(),
                        existing: other_sub.clone(),
                        incoming: substituted.clone(),
                    });
                }
            }
        }

        for (entity_type, original, substituted) in entries {
            self.forward
                .entry(entity_type.clone())
                .or_default()
                .insert(original.clone(), substituted.clone());
            self.inverse
                .entry(entity_type)
                .or_default()
                .insert(substituted, original);
        }
        Ok(())
    }

    /// Clear all entries and, with them, the per-type counters.
    pub fn reset(&mut self) {
        self.forward.clear();
        self.inverse.clear();
    }

    /// Full nested mapping, entity type → {substituted: original},
    /// ordered for stable audit output.
    pub fn export(&self) -> BTreeMap<String, BTreeMap<String, String>> {
        self.inverse
            .iter()
            .filter(|(_, m)| !m.is_empty())
            .map(|(entity_type, m)| {
                (
                    entity_type.clone(),
                    m.iter()
                        .map(|(s, o)| (s.clone(), o.clone()))
                        .collect::<BTreeMap<_, _>>(),
                )
            })
            .collect()
    }

    /// Combine entries from another store, for anonymizing multiple
    /// documents under one consistent mapping. Any conflicting
    /// assignment (either direction, per type) aborts the merge with
    /// neither store mutated.
    pub fn merge(&mut self, other: &MappingStore) -> Result<(), MappingError> {
        let entries: Vec<(String, String, String)> = other
            .forward
            .iter()
            .flat_map(|(entity_type, m)| {
                m.iter().map(move |(original, substituted)| {
                    (entity_type.clone(), original.clone(), substituted.clone())
                })
            })
            .collect();
        self.insert_many(entries)
    }

    /// Every (substituted, original) pair across all entity types, for
    /// the deanonymizer.
    pub fn substitution_pairs(&self) -> Vec<(&str, &str)> {
        self.inverse
            .values()
            .flat_map(|m| m.iter().map(|(s, o)| (s.as_str(), o.as_str())))
            .collect()
    }
}
