//! Column boundary inference for fixed-width text.
//!
//! Columns are found from whitespace that lines up across a sample of lines.
//! When nothing lines up, the first line is split on runs of two or more
//! spaces and its token positions become the column spans.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::source::DataTable;

/// Default number of non-empty lines sampled for alignment.
pub const DEFAULT_SAMPLE_LINES: usize = 10;

/// Prefix for synthetic column names.
pub const COLUMN_PREFIX: &str = "col_";

/// Non-space runs that may contain single spaces, separated by two or more.
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^ ](?:[^ ]| [^ ])*").unwrap());

/// A half-open range of character offsets within a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    /// Exclusive end; `usize::MAX` runs to the end of the line.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Slice a line (as chars) to this span, trimmed.
    fn extract(&self, chars: &[char]) -> String {
        if self.start >= chars.len() {
            return String::new();
        }
        let end = self.end.min(chars.len());
        chars[self.start..end].iter().collect::<String>().trim().to_string()
    }
}

/// Splits fixed-width text into a grid.
pub struct FixedWidthSegmenter {
    sample_lines: usize,
}

impl FixedWidthSegmenter {
    pub fn new() -> Self {
        Self {
            sample_lines: DEFAULT_SAMPLE_LINES,
        }
    }

    /// Sample at most `lines` non-empty lines when looking for alignment.
    pub fn with_sample_lines(lines: usize) -> Self {
        Self {
            sample_lines: lines.max(1),
        }
    }

    /// Infer column spans from the first non-empty lines of `text`.
    ///
    /// Returns an empty vector when fewer than two columns can be found.
    pub fn detect_spans(&self, text: &str) -> Vec<Span> {
        let sample: Vec<Vec<char>> = non_empty_lines(text)
            .take(self.sample_lines)
            .map(|l| l.chars().collect())
            .collect();

        if sample.is_empty() {
            return Vec::new();
        }

        let spans = aligned_spans(&sample);
        if spans.len() >= 2 {
            debug!(columns = spans.len(), "fixed-width columns from whitespace alignment");
            return spans;
        }

        let spans = token_spans(&sample[0]);
        if spans.len() >= 2 {
            debug!(columns = spans.len(), "fixed-width columns from first-line tokens");
            return spans;
        }

        Vec::new()
    }

    /// Slice every non-empty line of `text` into a positional-named table.
    pub fn segment(&self, text: &str) -> Option<DataTable> {
        let spans = self.detect_spans(text);
        if spans.is_empty() {
            return None;
        }

        let rows: Vec<Vec<String>> = non_empty_lines(text)
            .map(|line| {
                let chars: Vec<char> = line.chars().collect();
                spans.iter().map(|span| span.extract(&chars)).collect()
            })
            .collect();

        Some(DataTable::with_positional_names(COLUMN_PREFIX, rows))
    }
}

impl Default for FixedWidthSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.trim().is_empty())
}

/// Offsets where every sampled line has a space (or has ended) are gaps;
/// maximal runs of non-gap offsets are columns.
fn aligned_spans(lines: &[Vec<char>]) -> Vec<Span> {
    let width = lines.iter().map(Vec::len).max().unwrap_or(0);
    let is_gap = |i: usize| lines.iter().all(|l| i >= l.len() || l[i] == ' ');

    let mut spans = Vec::new();
    let mut start = None;
    for i in 0..width {
        match (is_gap(i), start) {
            (false, None) => start = Some(i),
            (true, Some(s)) => {
                spans.push(Span::new(s, i));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push(Span::new(s, width));
    }

    // Each column owns the gap after it; the last runs to the end of the line.
    let starts: Vec<usize> = spans.iter().skip(1).map(|s| s.start).collect();
    for (span, next) in spans.iter_mut().zip(starts) {
        span.end = next;
    }
    if let Some(last) = spans.last_mut() {
        last.end = usize::MAX;
    }
    spans
}

/// Spans running from each token's start to the next token's start.
fn token_spans(line: &[char]) -> Vec<Span> {
    let text: String = line.iter().collect();
    let starts: Vec<usize> = TOKEN_PATTERN
        .find_iter(&text)
        .map(|m| text[..m.start()].chars().count())
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| Span::new(start, starts.get(i + 1).copied().unwrap_or(usize::MAX)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_width_sample() -> String {
        [
            ("01/15/23", "Grocery store purchase", "125.50", "debit"),
            ("01/16/23", "ATM withdrawal", "200.00", "debit"),
            ("01/17/23", "Salary deposit", "2500.00", "credit"),
            ("01/18/23", "Gas station", "45.75", "debit"),
            ("01/19/23", "Online payment", "89.99", "debit"),
        ]
        .iter()
        .map(|(d, t, a, k)| format!("{:<10}{:<30}{:<10}{:<10}\n", d, t, a, k))
        .collect()
    }

    #[test]
    fn test_aligned_spans() {
        let spans = FixedWidthSegmenter::new().detect_spans(&fixed_width_sample());
        assert_eq!(
            spans,
            vec![
                Span::new(0, 10),
                Span::new(10, 40),
                Span::new(40, 50),
                Span::new(50, usize::MAX),
            ]
        );
    }

    #[test]
    fn test_segment_builds_grid() {
        let table = FixedWidthSegmenter::new()
            .segment(&fixed_width_sample())
            .unwrap();

        assert_eq!(table.headers, vec!["col_0", "col_1", "col_2", "col_3"]);
        assert_eq!(table.row_count(), 5);
        assert_eq!(table.get(2, 1), Some("Salary deposit"));
        assert_eq!(table.get(2, 2), Some("2500.00"));
        assert_eq!(table.get(2, 3), Some("credit"));
    }

    #[test]
    fn test_token_fallback_when_nothing_aligns() {
        // Every offset holds a non-space in at least one line.
        let text = "2023-01-01  Coffee  4.50\nxxxxxxxxxxxxxxxxxxxxxxxxxx\n";
        let spans = FixedWidthSegmenter::new().detect_spans(text);
        assert_eq!(
            spans,
            vec![Span::new(0, 12), Span::new(12, 20), Span::new(20, usize::MAX)]
        );
    }

    #[test]
    fn test_token_pattern_keeps_single_spaces() {
        let line: Vec<char> = "Gas station  45.75".chars().collect();
        assert_eq!(token_spans(&line), vec![Span::new(0, 13), Span::new(13, usize::MAX)]);
    }

    #[test]
    fn test_no_columns() {
        let segmenter = FixedWidthSegmenter::new();
        assert!(segmenter.detect_spans("").is_empty());
        assert!(segmenter.detect_spans("single\ncolumn\n").is_empty());
        assert!(segmenter.segment("onlyone\n").is_none());
    }

    #[test]
    fn test_wide_values_past_sample_stay_whole() {
        let mut text: String = (1..=10)
            .map(|day| {
                format!(
                    "{:<10}{:<30}{:<10}{:<10}\n",
                    format!("01/{:02}/23", day),
                    "Coffee shop",
                    format!("{}.00", day * 50),
                    "debit"
                )
            })
            .collect();
        text.push_str(&format!(
            "{:<10}{:<30}{:<10}{:<10}\n",
            "01/11/23", "Annual insurance premium paid", "12345.67", "debit"
        ));

        let table = FixedWidthSegmenter::new().segment(&text).unwrap();
        assert_eq!(table.row_count(), 11);
        assert_eq!(table.get(10, 0), Some("01/11/23"));
        assert_eq!(table.get(10, 1), Some("Annual insurance premium paid"));
        assert_eq!(table.get(10, 2), Some("12345.67"));
        assert_eq!(table.get(10, 3), Some("debit"));
    }

    #[test]
    fn test_sample_limit_ignores_later_lines() {
        let mut text = String::from("ab  cd\nab  cd\n");
        text.push_str("abcdef\n");
        let spans = FixedWidthSegmenter::with_sample_lines(2).detect_spans(&text);
        assert_eq!(spans, vec![Span::new(0, 4), Span::new(4, usize::MAX)]);
    }
}
