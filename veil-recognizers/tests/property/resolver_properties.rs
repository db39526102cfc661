use proptest::prelude::*;
use veil_core::models::DetectedSpan;
use veil_recognizers::resolve_spans;

fn arbitrary_spans(text_len: usize) -> impl Strategy<Value = Vec<DetectedSpan>> {
    prop::collection::vec(
        (0..text_len, 0..text_len, 0u32..100).prop_map(|(a, b, score)| {
            let (start, end) = if a <= b { (a, b) } else { (b, a) };
            DetectedSpan::new(start, end, "X", f64::from(score) / 100.0, "")
        }),
        0..24,
    )
}

proptest! {
    // ── Output is always ordered and non-overlapping ─────────────────────

    #[test]
    fn resolution_yields_ordered_disjoint_spans(
        spans in arbitrary_spans(64)
    ) {
        let text = "a".repeat(64);
        let resolved = resolve_spans(&text, spans);
        for pair in resolved.windows(2) {
            prop_assert!(pair[0].start < pair[1].start);
            prop_assert!(pair[0].end <= pair[1].start);
        }
        for span in &resolved {
            prop_assert!(span.start < span.end);
            prop_assert!(span.end <= text.len());
        }
    }

    // ── Resolution is deterministic ──────────────────────────────────────

    #[test]
    fn resolution_is_deterministic(
        spans in arbitrary_spans(64)
    ) {
        let text = "a".repeat(64);
        let first = resolve_spans(&text, spans.clone());
        let second = resolve_spans(&text, spans);
        prop_assert_eq!(first, second);
    }
}
