use proptest::prelude::*;
use veil_engine::AnonymizerEngine;

// ── Raw values never survive anonymization ────────────────────────────────

proptest! {
    #[test]
    fn anonymized_output_never_contains_the_raw_email(
        user in "[a-z]{3,8}",
        domain in "[a-z]{3,8}"
    ) {
        let email = format!("{user}@{domain}.com");
        let input = format!("contact: {email}");
        let mut engine = AnonymizerEngine::new();
        let out = engine.anonymize(&input).unwrap();
        prop_assert!(
            !out.contains(&email),
            "raw email found in anonymized output: {out}"
        );
    }
}

// ── Round trip ────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn exact_output_round_trips(
        user in "[a-z]{3,8}",
        other in "[a-z]{3,8}",
        domain in "[a-z]{3,8}"
    ) {
        let input = format!(
            "mail {user}@{domain}.org, escalate to {other}@{domain}.net if needed"
        );
        let mut engine = AnonymizerEngine::new();
        let anonymized = engine.anonymize(&input).unwrap();
        prop_assert_eq!(
            engine.deanonymize(&anonymized),
            input,
            "round trip diverged via {}",
            anonymized
        );
    }
}

// ── Consistency across calls ──────────────────────────────────────────────

proptest! {
    #[test]
    fn same_value_reuses_its_substitute_across_calls(
        user in "[a-z]{3,8}"
    ) {
        let email = format!("{user}@corp.example");
        let mut engine = AnonymizerEngine::new();
        let first = engine.anonymize(&email).unwrap();
        let second = engine.anonymize(&email).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn distinct_values_never_share_a_substitute(
        a in "[a-z]{3,8}",
        b in "[a-z]{3,8}"
    ) {
        prop_assume!(a != b);
        let mut engine = AnonymizerEngine::new();
        let sub_a = engine.anonymize(&format!("{a}@left.example")).unwrap();
        let sub_b = engine.anonymize(&format!("{b}@right.example")).unwrap();
        prop_assert_ne!(sub_a, sub_b);

        let mapping = engine.export_mapping();
        prop_assert_eq!(mapping["EMAIL_ADDRESS"].len(), 2);
    }
}

// ── Deanonymize is total ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn deanonymize_never_panics_on_arbitrary_text(
        text in ".{0,200}"
    ) {
        let mut engine = AnonymizerEngine::new();
        engine.anonymize("seed john.doe@company.org 4111 1111 1111 1111").unwrap();
        let _ = engine.deanonymize(&text);
    }
}
