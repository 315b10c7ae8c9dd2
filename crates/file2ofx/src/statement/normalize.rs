//! Value normalization for statement fields.
//!
//! Source cells stay as text until here. Every function falls back to a
//! fixed value instead of failing, so one malformed cell never aborts a
//! statement.

use std::fmt;

use chrono::{NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::inference::classifiers::{ParsedDate, parse_date, strip_currency};
use crate::schema::Transaction;

/// `YYYYMMDDHHMMSS`
pub const OFX_DATETIME_FORMAT: &str = "%Y%m%d%H%M%S";

/// Amount written when a cell cannot be read as a number.
pub const ZERO_AMOUNT: &str = "0.00";

/// Longest description kept, in characters.
pub const MAX_TEXT_LENGTH: usize = 255;

const TRUNCATION_MARKER: &str = "...";

/// Modulus that folds the digest into eight decimal digits.
const FIT_ID_MODULUS: u64 = 100_000_000;

static PLAIN_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-+]?(\d+\.?\d*|\.\d+)$").unwrap());

/// Explicit type words and the tag each maps to.
const TYPE_DICTIONARY: &[(&str, TransactionType)] = &[
    ("debit", TransactionType::Debit),
    ("credit", TransactionType::Credit),
    ("deposit", TransactionType::Credit),
    ("withdrawal", TransactionType::Debit),
    ("transfer", TransactionType::Transfer),
    ("payment", TransactionType::Debit),
    ("purchase", TransactionType::Debit),
    ("refund", TransactionType::Credit),
    ("fee", TransactionType::Debit),
    ("interest", TransactionType::Credit),
];

/// `TRNTYPE` values the generator emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    Debit,
    Credit,
    Transfer,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Debit => "DEBIT",
            TransactionType::Credit => "CREDIT",
            TransactionType::Transfer => "XFER",
        }
    }

    /// Look up an explicit type word, ignoring case and padding.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        TYPE_DICTIONARY
            .iter()
            .find(|(word, _)| *word == label)
            .map(|(_, t)| *t)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// AMOUNTS
// =============================================================================

/// Normalize an amount cell to plain decimal text.
///
/// Currency symbols, whitespace and thousands separators are removed and
/// `.00` is appended when no decimal point remains. Anything that is not a
/// number afterwards becomes `0.00`.
pub fn normalize_amount(value: &str) -> String {
    let cleaned = strip_separators(value);
    if !PLAIN_NUMBER.is_match(&cleaned) {
        return ZERO_AMOUNT.to_string();
    }

    if cleaned.contains('.') {
        cleaned
    } else {
        format!("{}.00", cleaned)
    }
}

/// Numeric value of an amount cell, if it has one.
pub fn parse_amount(value: &str) -> Option<f64> {
    let cleaned = strip_separators(value);
    if !PLAIN_NUMBER.is_match(&cleaned) {
        return None;
    }
    cleaned.parse().ok()
}

fn strip_separators(value: &str) -> String {
    strip_currency(value)
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect()
}

fn is_positive(value: Option<&str>) -> bool {
    value.and_then(parse_amount).is_some_and(|v| v > 0.0)
}

/// The raw amount cell a transaction is reported with.
///
/// A positive debit wins, then a positive credit, then the signed amount.
pub fn chosen_amount(transaction: &Transaction) -> Option<&str> {
    if is_positive(transaction.debit.as_deref()) {
        return transaction.debit.as_deref();
    }
    if is_positive(transaction.credit.as_deref()) {
        return transaction.credit.as_deref();
    }
    transaction.amount.as_deref()
}

/// Derive `TRNTYPE` for a transaction.
pub fn transaction_type(transaction: &Transaction) -> TransactionType {
    if let Some(t) = transaction
        .transaction_type
        .as_deref()
        .and_then(TransactionType::from_label)
    {
        return t;
    }

    if is_positive(transaction.debit.as_deref()) {
        return TransactionType::Debit;
    }
    if is_positive(transaction.credit.as_deref()) {
        return TransactionType::Credit;
    }

    match transaction.amount.as_deref().and_then(parse_amount) {
        Some(v) if v < 0.0 => TransactionType::Debit,
        Some(_) => TransactionType::Credit,
        None => TransactionType::Debit,
    }
}

// =============================================================================
// DATES
// =============================================================================

/// Format a timestamp as `YYYYMMDDHHMMSS`.
pub fn format_datetime(datetime: &NaiveDateTime) -> String {
    datetime.format(OFX_DATETIME_FORMAT).to_string()
}

/// The instant a parsed cell stands for; bare dates sit at noon.
pub fn statement_instant(parsed: &ParsedDate) -> NaiveDateTime {
    if parsed.has_time {
        parsed.datetime
    } else {
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN);
        parsed.datetime.date().and_time(noon)
    }
}

/// Render a date cell, falling back to `now` when it does not parse.
pub fn format_date(value: &str, now: &NaiveDateTime) -> String {
    match parse_date(value) {
        Some(parsed) => format_datetime(&statement_instant(&parsed)),
        None => format_datetime(now),
    }
}

/// Earliest and latest parsed transaction dates.
pub fn date_range(transactions: &[Transaction]) -> Option<(NaiveDateTime, NaiveDateTime)> {
    transactions
        .iter()
        .filter_map(|t| parse_date(&t.date))
        .map(|p| statement_instant(&p))
        .fold(None, |range, instant| match range {
            None => Some((instant, instant)),
            Some((lo, hi)) => Some((lo.min(instant), hi.max(instant))),
        })
}

// =============================================================================
// IDENTIFIERS AND TEXT
// =============================================================================

/// Stable eight-digit `FITID` for a transaction's content.
pub fn fit_id(date: &str, amount: &str, description: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(date.as_bytes());
    hasher.update(b"|");
    hasher.update(amount.as_bytes());
    hasher.update(b"|");
    hasher.update(description.as_bytes());
    let digest = hasher.finalize();

    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    format!("{:08}", u64::from_be_bytes(prefix) % FIT_ID_MODULUS)
}

/// Escape the five SGML-reserved characters.
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Escape and cap text at [`MAX_TEXT_LENGTH`] characters.
///
/// Line breaks become spaces. Longer text is cut and ends in `...`; an
/// entity is never split.
pub fn sanitize_text(value: &str) -> String {
    let flat = value.trim().replace("\r\n", " ").replace(['\r', '\n'], " ");
    let escaped = escape_text(&flat);
    if escaped.chars().count() <= MAX_TEXT_LENGTH {
        return escaped;
    }

    let keep = MAX_TEXT_LENGTH - TRUNCATION_MARKER.len();
    let mut cut: String = escaped.chars().take(keep).collect();

    // Drop a partial entity left at the cut.
    if let Some(amp) = cut.rfind('&') {
        if !cut[amp..].contains(';') {
            cut.truncate(amp);
        }
    }

    cut.push_str(TRUNCATION_MARKER);
    cut
}
