//! Property-based tests for classifiers and statement normalization.
//!
//! Property-based tests verify:
//! 1. **No panics**: classifiers and normalizers accept any input
//! 2. **Determinism**: same input always produces same output
//! 3. **Invariants**: normalized amounts, identifiers and text keep their shape
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p file2ofx --test property_tests
//!
//! # More cases
//! PROPTEST_CASES=10000 cargo test -p file2ofx --test property_tests
//! ```

use proptest::prelude::*;

use file2ofx::inference::ColumnDetector;
use file2ofx::inference::classifiers::{is_amount, is_date, is_description, is_type, parse_date};
use file2ofx::input::{FixedWidthSegmenter, parse_column_line};
use file2ofx::statement::normalize::{MAX_TEXT_LENGTH, fit_id, normalize_amount, sanitize_text};

// =============================================================================
// Test Strategies
// =============================================================================

/// Arbitrary printable text, including currency symbols and punctuation.
fn cell_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 $€£,.\\-/:&<>\"']{0,60}"
}

/// Strings shaped like money amounts.
fn amount_like() -> impl Strategy<Value = String> {
    prop_oneof![
        "-?[0-9]{1,7}",
        "-?[0-9]{1,7}\\.[0-9]{2}",
        "\\$[0-9]{1,3}(,[0-9]{3}){0,2}\\.[0-9]{2}",
        "€ ?[0-9]{1,5}",
    ]
}

/// Strings shaped like dates.
fn date_like() -> impl Strategy<Value = String> {
    prop_oneof![
        (2000u32..2030, 1u32..13, 1u32..29)
            .prop_map(|(y, m, d)| format!("{:04}-{:02}-{:02}", y, m, d)),
        (2000u32..2030, 1u32..13, 1u32..29)
            .prop_map(|(y, m, d)| format!("{:02}/{:02}/{:04}", m, d, y)),
        (0u32..100, 1u32..13, 1u32..29).prop_map(|(y, m, d)| format!("{:02}/{:02}/{:02}", m, d, y)),
        (2000u32..2030, 1u32..13, 1u32..29)
            .prop_map(|(y, m, d)| format!("{:04}{:02}{:02}", y, m, d)),
    ]
}

// =============================================================================
// Classifiers
// =============================================================================

proptest! {
    #[test]
    fn classifiers_never_panic(value in "\\PC{0,80}") {
        let _ = is_date(&value);
        let _ = is_amount(&value);
        let _ = is_description(&value);
        let _ = is_type(&value);
        let _ = parse_date(&value);
        let _ = ColumnDetector::role_for_header(&value);
    }

    #[test]
    fn classifiers_are_deterministic(value in cell_text()) {
        prop_assert_eq!(is_date(&value), is_date(&value));
        prop_assert_eq!(is_amount(&value), is_amount(&value));
        prop_assert_eq!(is_description(&value), is_description(&value));
    }

    #[test]
    fn generated_dates_are_dates(value in date_like()) {
        prop_assert!(is_date(&value), "{} not recognized", value);
        prop_assert!(parse_date(&value).is_some(), "{} not parsed", value);
        prop_assert!(!is_description(&value));
    }

    #[test]
    fn descriptions_exclude_amounts(value in amount_like()) {
        if is_amount(&value) {
            prop_assert!(!is_description(&value));
        }
    }
}

// =============================================================================
// Normalization
// =============================================================================

proptest! {
    #[test]
    fn amount_normalization_is_idempotent(value in prop_oneof![amount_like(), cell_text()]) {
        let once = normalize_amount(&value);
        prop_assert_eq!(normalize_amount(&once), once.clone());
        prop_assert!(once.contains('.'));
        prop_assert!(once.parse::<f64>().is_ok(), "{:?} -> {:?}", value, once);
    }

    #[test]
    fn grouped_amounts_lose_separators(whole in 1_000u64..10_000_000, cents in 0u32..100) {
        let grouped = format!("${}.{:02}", group_thousands(whole), cents);
        prop_assert_eq!(normalize_amount(&grouped), format!("{}.{:02}", whole, cents));
    }

    #[test]
    fn fit_id_is_stable_and_eight_digits(
        date in date_like(),
        amount in amount_like(),
        description in cell_text(),
    ) {
        let id = fit_id(&date, &amount, &description);
        prop_assert_eq!(id.len(), 8);
        prop_assert!(id.chars().all(|c| c.is_ascii_digit()));
        prop_assert_eq!(id, fit_id(&date, &amount, &description));
    }

    #[test]
    fn sanitized_text_is_bounded_and_escaped(value in "\\PC{0,400}") {
        let out = sanitize_text(&value);
        prop_assert!(out.chars().count() <= MAX_TEXT_LENGTH);
        prop_assert!(!out.contains('<'));
        prop_assert!(!out.contains('>'));
        prop_assert!(!out.contains('"'));
        prop_assert!(!out.contains('\n'));
    }
}

// =============================================================================
// Input helpers
// =============================================================================

proptest! {
    #[test]
    fn column_line_round_trips_plain_names(names in prop::collection::vec("[A-Za-z][A-Za-z _]{0,12}", 1..8)) {
        let line = names.join(",");
        let parsed = parse_column_line(&line).unwrap();
        let expected: Vec<String> = names.iter().map(|n| n.trim().to_string()).collect();
        prop_assert_eq!(parsed, expected);
    }

    #[test]
    fn segmenter_never_panics(text in "[ a-z0-9./\\n]{0,400}") {
        let segmenter = FixedWidthSegmenter::new();
        let spans = segmenter.detect_spans(&text);
        prop_assert!(spans.is_empty() || spans.len() >= 2);
        if let Some(table) = segmenter.segment(&text) {
            prop_assert_eq!(table.column_count(), spans.len());
        }
    }
}

fn group_thousands(mut value: u64) -> String {
    let mut groups = Vec::new();
    while value >= 1_000 {
        groups.push(format!("{:03}", value % 1_000));
        value /= 1_000;
    }
    groups.push(value.to_string());
    groups.reverse();
    groups.join(",")
}
