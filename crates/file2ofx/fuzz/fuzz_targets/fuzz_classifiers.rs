//! Fuzz target for value classifiers and amount/date normalization.

#![no_main]

use libfuzzer_sys::fuzz_target;
use file2ofx::inference::classifiers;
use file2ofx::statement::normalize;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    if let Ok(value) = std::str::from_utf8(data) {
        let _ = classifiers::is_date(value);
        let _ = classifiers::is_amount(value);
        let _ = classifiers::is_description(value);
        let _ = classifiers::is_type(value);
        let _ = classifiers::parse_date(value);

        let normalized = normalize::normalize_amount(value);
        assert_eq!(normalize::normalize_amount(&normalized), normalized);

        let text = normalize::sanitize_text(value);
        assert!(text.chars().count() <= normalize::MAX_TEXT_LENGTH);
    }
});
