use veil_core::config::EngineConfig;
use veil_engine::{AnonymizerEngine, Operator};

fn engine_with_person() -> AnonymizerEngine {
    let mut engine = AnonymizerEngine::new();
    engine
        .register_recognizer("test.person", "PERSON", r"John Doe|Jane Roe", 0.85)
        .unwrap();
    engine
}

// ── Idempotent re-anonymization ───────────────────────────────────────────

#[test]
fn same_value_anonymizes_identically_across_calls() {
    let mut engine = engine_with_person();
    let first = engine.anonymize("John Doe called.").unwrap();
    let second = engine.anonymize("Then John Doe called again.").unwrap();
    assert_eq!(first, "<PERSON> called.");
    assert_eq!(second, "Then <PERSON> called again.");
}

#[test]
fn repeated_mention_within_one_call_reuses_the_substitute() {
    let mut engine = engine_with_person();
    let out = engine.anonymize("John Doe met John Doe.").unwrap();
    assert_eq!(out, "<PERSON> met <PERSON>.");
}

// ── Uniqueness ────────────────────────────────────────────────────────────

#[test]
fn distinct_values_get_distinct_placeholders() {
    let mut engine = engine_with_person();
    let out = engine.anonymize("John Doe emailed Jane Roe.").unwrap();
    assert_eq!(out, "<PERSON> emailed <PERSON_2>.");

    let mapping = engine.export_mapping();
    assert_eq!(mapping["PERSON"]["<PERSON>"], "John Doe");
    assert_eq!(mapping["PERSON"]["<PERSON_2>"], "Jane Roe");
}

#[test]
fn placeholder_counter_persists_across_calls() {
    let mut engine = engine_with_person();
    engine.anonymize("John Doe").unwrap();
    let out = engine.anonymize("Jane Roe").unwrap();
    assert_eq!(out, "<PERSON_2>");
}

// ── Round trip ────────────────────────────────────────────────────────────

#[test]
fn round_trip_restores_the_exact_document() {
    let mut engine = engine_with_person();
    let document =
        "John Doe (john.doe@company.org) paid 4111 1111 1111 1111 on 2023-10-05. Jane Roe approved.";
    let anonymized = engine.anonymize(document).unwrap();
    assert_ne!(anonymized, document);
    assert!(!anonymized.contains("John Doe"));
    assert!(!anonymized.contains("john.doe@company.org"));
    assert!(!anonymized.contains("4111"));

    let restored = engine.deanonymize(&anonymized);
    assert_eq!(restored, document);
}

// ── Reset ─────────────────────────────────────────────────────────────────

#[test]
fn reset_clears_mapping_and_restarts_counters() {
    let mut engine = engine_with_person();
    engine.anonymize("John Doe and Jane Roe").unwrap();
    assert!(!engine.export_mapping().is_empty());

    engine.reset_mapping();
    assert!(engine.export_mapping().is_empty());

    // A previously seen value starts over at the base label.
    let out = engine.anonymize("Jane Roe").unwrap();
    assert_eq!(out, "<PERSON>");
}

// ── Longest-match deanonymization ─────────────────────────────────────────

#[test]
fn longest_substitute_matches_first() {
    let mut engine = engine_with_person();
    engine.anonymize("John Doe then Jane Roe").unwrap();

    // Simulates an LLM answer that reordered the placeholders.
    let restored = engine.deanonymize("Contact <PERSON_2> about <PERSON>");
    assert_eq!(restored, "Contact Jane Roe about John Doe");
}

#[test]
fn paraphrased_text_deanonymizes_best_effort() {
    let mut engine = engine_with_person();
    engine.anonymize("John Doe").unwrap();
    let restored = engine.deanonymize("As discussed, <PERSON> (the customer) will follow up.");
    assert_eq!(restored, "As discussed, John Doe (the customer) will follow up.");
    // Broken tokens stay untouched, never an error.
    assert_eq!(engine.deanonymize("<PERSON"), "<PERSON");
}

// ── Concrete scenario: credit card + repeated person ─────────────────────

#[test]
fn credit_card_and_repeated_person_scenario() {
    let mut engine = engine_with_person();
    let out = engine
        .anonymize("John Doe paid with 4111 1111 1111 1111. Receipt goes to John Doe.")
        .unwrap();

    assert_eq!(out.matches("<PERSON>").count(), 2, "output: {out}");
    assert_eq!(out.matches("<CREDIT_CARD>").count(), 1, "output: {out}");

    let mapping = engine.export_mapping();
    assert_eq!(mapping.len(), 2, "expected exactly 2 entity types: {mapping:?}");
    assert_eq!(mapping["PERSON"]["<PERSON>"], "John Doe");
    assert_eq!(
        mapping["CREDIT_CARD"]["<CREDIT_CARD>"],
        "4111 1111 1111 1111"
    );
}

// ── Synthetic mode ────────────────────────────────────────────────────────

#[test]
fn fixed_seed_makes_two_instances_byte_identical() {
    let config = EngineConfig {
        synthetic_mode: true,
        seed: Some(42),
        builtin_recognizers: true,
    };
    let input = "Reach john.doe@company.org or 192.168.1.10, card 4111 1111 1111 1111.";

    let mut a = AnonymizerEngine::from_config(config.clone());
    let mut b = AnonymizerEngine::from_config(config);
    assert_eq!(a.anonymize(input).unwrap(), b.anonymize(input).unwrap());
}

#[test]
fn set_mode_reseeds_for_reproducibility() {
    let input = "mail one@alpha.test and two@beta.test";

    let mut a = AnonymizerEngine::new();
    a.set_mode(true, Some(7));
    let mut b = AnonymizerEngine::new();
    b.set_mode(true, Some(7));
    assert_eq!(a.anonymize(input).unwrap(), b.anonymize(input).unwrap());
}

#[test]
fn synthetic_substitutes_round_trip_like_placeholders() {
    let mut engine = AnonymizerEngine::from_config(EngineConfig {
        synthetic_mode: true,
        seed: Some(3),
        builtin_recognizers: true,
    });
    let document = "Billing contact: billing@acme.example, card 4111-1111-1111-1111.";
    let anonymized = engine.anonymize(document).unwrap();
    assert!(!anonymized.contains("billing@acme.example"));
    assert_eq!(engine.deanonymize(&anonymized), document);
}

// ── Operators ─────────────────────────────────────────────────────────────

#[test]
fn custom_operator_drives_substitution() {
    let mut engine = engine_with_person();
    engine.set_operator(
        "PERSON",
        Operator::custom(|original| Ok(format!("REDACTED({} chars)", original.len()))),
    );
    let out = engine.anonymize("John Doe spoke.").unwrap();
    assert_eq!(out, "REDACTED(8 chars) spoke.");
    assert_eq!(engine.deanonymize(&out), "John Doe spoke.");
}

#[test]
fn keep_operator_leaves_span_and_mapping_alone() {
    let mut engine = engine_with_person();
    engine.set_operator("PERSON", Operator::Keep);
    let out = engine
        .anonymize("John Doe's card: 4111 1111 1111 1111")
        .unwrap();
    assert!(out.contains("John Doe"));
    assert!(out.contains("<CREDIT_CARD>"));
    assert!(!engine.export_mapping().contains_key("PERSON"));
}

// ── Failure atomicity ─────────────────────────────────────────────────────

#[test]
fn operator_failure_fails_the_whole_call_and_commits_nothing() {
    let mut engine = engine_with_person();
    engine.set_operator(
        "CREDIT_CARD",
        Operator::custom(|_| anyhow::bail!("vault unavailable")),
    );

    let result = engine.anonymize("John Doe paid with 4111 1111 1111 1111.");
    assert!(result.is_err());
    // The person span had already been assigned within the call; the
    // failed call must leave no trace of it.
    assert!(engine.export_mapping().is_empty());

    // The engine stays usable after the failure.
    engine.set_operator("CREDIT_CARD", Operator::Placeholder);
    let out = engine
        .anonymize("John Doe paid with 4111 1111 1111 1111.")
        .unwrap();
    assert_eq!(out, "<PERSON> paid with <CREDIT_CARD>.");
}

#[test]
fn recognizer_failure_aborts_before_any_substitution() {
    use std::sync::Arc;
    use veil_core::errors::{DetectionError, VeilResult};
    use veil_core::models::DetectedSpan;
    use veil_core::traits::IRecognizer;

    struct FlakyDetector;
    impl IRecognizer for FlakyDetector {
        fn name(&self) -> &str {
            "flaky-ner"
        }
        fn entity_type(&self) -> &str {
            "PERSON"
        }
        fn analyze(&self, _text: &str) -> VeilResult<Vec<DetectedSpan>> {
            Err(DetectionError::RecognizerFailed {
                name: "flaky-ner".into(),
                reason: "model endpoint timed out".into(),
            }
            .into())
        }
    }

    let mut engine = engine_with_person();
    engine.register(Arc::new(FlakyDetector));
    let result = engine.anonymize("John Doe, john.doe@company.org");
    assert!(result.is_err());
    assert!(engine.export_mapping().is_empty());
}

// ── Registry behavior through the engine ─────────────────────────────────

#[test]
fn unregister_stops_detection_for_that_rule_only() {
    let mut engine = engine_with_person();
    engine
        .register_recognizer("test.codename", "PERSON", r"Agent \d+", 0.8)
        .unwrap();
    assert!(engine.unregister("test.codename"));

    let out = engine.anonymize("Agent 47 met John Doe").unwrap();
    assert!(out.contains("Agent 47"), "removed rule still firing: {out}");
    assert!(out.contains("<PERSON>"));
}

#[test]
fn invalid_pattern_is_rejected_up_front() {
    let mut engine = AnonymizerEngine::new();
    let result = engine.register_recognizer("bad", "X", "(unclosed", 0.5);
    assert!(result.is_err());
}

// ── Detailed output ───────────────────────────────────────────────────────

#[test]
fn detailed_output_offsets_point_into_the_output_text() {
    let mut engine = engine_with_person();
    let detailed = engine
        .anonymize_detailed("Say hi to John Doe and Jane Roe today")
        .unwrap();
    assert_eq!(detailed.replacements.len(), 2);
    for r in &detailed.replacements {
        assert_eq!(&detailed.text[r.start..r.end], r.substituted);
    }
}
