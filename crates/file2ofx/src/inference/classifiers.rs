//! Single-value predicates used by column detection.
//!
//! Each test looks at one cell. Column-level decisions (sampling and
//! thresholds) live in the detector.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================

/// Structural date shapes, checked before any format parsing.
static DATE_SHAPES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{8}$").unwrap(),               // YYYYMMDD
        Regex::new(r"^\d{6}$").unwrap(),               // MMDDYY or YYMMDD
        Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap(),   // YYYY-MM-DD
        Regex::new(r"^\d{2}/\d{2}/\d{4}$").unwrap(),   // MM/DD/YYYY
        Regex::new(r"^\d{2}/\d{2}/\d{2}$").unwrap(),   // MM/DD/YY
    ]
});

/// Optional minus, digits with optional comma grouping, optional two-digit cents.
static AMOUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?(\d{1,3}(,\d{3})+|\d+)(\.\d{2})?$").unwrap());

/// Currency symbols stripped before amount matching.
pub const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥', '₹', '₽', '₿'];

/// Punctuation that marks a value as prose.
const DESCRIPTION_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':'];

/// Closed vocabulary of transaction-type words.
pub const TYPE_VOCABULARY: &[&str] = &[
    "debit",
    "credit",
    "deposit",
    "withdrawal",
    "transfer",
    "payment",
    "purchase",
    "refund",
    "fee",
    "interest",
    "atm",
    "check",
    "ach",
    "wire",
    "pos",
];

/// Date-only formats in parse order. First success wins.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%Y%m%d",
];

/// Date-time formats, tried after the date-only list.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

/// A successfully parsed date cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDate {
    pub datetime: NaiveDateTime,
    /// Whether the source text carried a time of day.
    pub has_time: bool,
}

/// Parse a date cell with the fixed format list.
pub fn parse_date(value: &str) -> Option<ParsedDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(ParsedDate {
                datetime: date.and_time(NaiveTime::MIN),
                has_time: false,
            });
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(ParsedDate {
                datetime,
                has_time: true,
            });
        }
    }

    None
}

/// Check if a value looks like a date.
pub fn is_date(value: &str) -> bool {
    let trimmed = value.trim();
    DATE_SHAPES.iter().any(|p| p.is_match(trimmed)) || parse_date(trimmed).is_some()
}

/// Strip currency symbols and whitespace.
pub fn strip_currency(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && !CURRENCY_SYMBOLS.contains(c))
        .collect()
}

/// Check if a value looks like a money amount.
pub fn is_amount(value: &str) -> bool {
    AMOUNT_PATTERN.is_match(&strip_currency(value))
}

/// Check if a value looks like free text.
///
/// Amounts and dates never count as descriptions.
pub fn is_description(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.chars().count() < 3 {
        return false;
    }
    if is_amount(trimmed) || is_date(trimmed) {
        return false;
    }

    let has_upper = trimmed.chars().any(char::is_uppercase);
    let has_lower = trimmed.chars().any(char::is_lowercase);
    let has_punctuation = trimmed.chars().any(|c| DESCRIPTION_PUNCTUATION.contains(&c));

    (has_upper && has_lower) || has_punctuation
}

/// Check if a value is a known transaction-type word.
pub fn is_type(value: &str) -> bool {
    let lower = value.trim().to_lowercase();
    TYPE_VOCABULARY.contains(&lower.as_str())
}
