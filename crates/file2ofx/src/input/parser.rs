//! Transaction file parser with column layout and role detection.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::fixed_width::{DEFAULT_SAMPLE_LINES, FixedWidthSegmenter};
use super::format::{InputFormat, TextEncoding};
use super::schema_file::read_column_file;
use super::source::DataTable;
use crate::error::{ConvertError, Result};
use crate::inference::{ColumnDetector, DEFAULT_SAMPLE_LIMIT, classifiers};
use crate::schema::{Role, RoleAssignment, Transaction};

/// Delimiters to try, in order, on generic text input.
const CANDIDATE_DELIMITERS: &[u8] = &[b',', b'\t', b'|', b';'];

/// Header detection alone is trusted once it finds this many roles.
const HEADER_ROLE_MINIMUM: usize = 3;

/// Prefix for positional column names in headerless input.
const POSITIONAL_PREFIX: &str = "col_";

/// Parser configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Requested input format.
    pub format: InputFormat,
    /// Text encoding of the input bytes.
    pub encoding: TextEncoding,
    /// Maximum non-null values sampled per column.
    pub sample_limit: usize,
    /// Non-empty lines sampled for fixed-width alignment.
    pub fixed_width_sample_lines: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            format: InputFormat::Auto,
            encoding: TextEncoding::Utf8,
            sample_limit: DEFAULT_SAMPLE_LIMIT,
            fixed_width_sample_lines: DEFAULT_SAMPLE_LINES,
        }
    }
}

impl ParserConfig {
    pub fn with_format(mut self, format: InputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

/// How the columns of a file were found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Layout {
    /// Delimited text with an in-file header row.
    HeaderRow { delimiter: char },
    /// Headerless delimited text named by a `.cols` sidecar.
    ColumnFile { columns: usize },
    /// Headerless delimited text found by trying candidate delimiters.
    Delimited { delimiter: char },
    /// Fixed-width text segmented on aligned whitespace.
    FixedWidth { columns: usize },
}

/// Result of parsing one input file.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    /// Transactions in source order.
    pub transactions: Vec<Transaction>,
    /// Roles assigned to the table's columns.
    pub assignment: RoleAssignment,
    /// Layout used to read the table.
    pub layout: Layout,
    /// Concrete format after auto resolution.
    pub format: InputFormat,
    /// Rows dropped for missing required values.
    pub dropped_rows: usize,
}

/// Parses transaction files into role-tagged transactions.
pub struct FileParser {
    config: ParserConfig,
    detector: ColumnDetector,
}

impl FileParser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        let detector = ColumnDetector::with_sample_limit(config.sample_limit);
        Self { config, detector }
    }

    /// Parse a transaction file.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<ParsedFile> {
        let path = path.as_ref();
        let text = self.read_text(path)?;

        let format = self.config.format.resolve(path, &text);
        info!(path = %path.display(), %format, "parsing transaction file");

        match format {
            InputFormat::Delimited => self.parse_delimited(path, &text),
            _ => self.parse_text(path, &text),
        }
    }

    /// Read and decode the whole file, rejecting empty and non-regular files.
    fn read_text(&self, path: &Path) -> Result<String> {
        let metadata = fs::metadata(path).map_err(|e| ConvertError::io(path, e))?;
        if !metadata.is_file() {
            return Err(ConvertError::NotAFile(path.to_path_buf()));
        }

        let bytes = fs::read(path).map_err(|e| ConvertError::io(path, e))?;
        let text = self.config.encoding.decode(&bytes, path)?;
        if text.trim().is_empty() {
            return Err(ConvertError::EmptyData(format!(
                "'{}' is empty",
                path.display()
            )));
        }
        Ok(text)
    }

    /// Delimited input with a header row somewhere near the top.
    ///
    /// Rows before the first one mentioning "date" or "transaction" are
    /// titles and noise.
    pub fn parse_delimited(&self, path: &Path, text: &str) -> Result<ParsedFile> {
        let records = read_records(text, b',')?;

        let header_index = records
            .iter()
            .position(|row| is_header_row(row))
            .ok_or_else(|| ConvertError::HeaderNotFound {
                path: path.to_path_buf(),
            })?;
        debug!(row = header_index, "located header row");

        let mut records = records.into_iter().skip(header_index);
        let headers = records.next().unwrap_or_default();
        let rows = fit_rows(records.collect(), headers.len());
        if rows.is_empty() {
            return Err(ConvertError::EmptyData(format!(
                "'{}' has no rows after the header",
                path.display()
            )));
        }

        let table = DataTable::new(headers, rows);
        let mut assignment = self.detector.detect_from_headers(&table.headers);
        if assignment.len() < HEADER_ROLE_MINIMUM {
            debug!(roles = assignment.len(), "headers inconclusive, sampling data");
            self.detector.augment_from_data(&table, &mut assignment);
        }
        self.detector
            .validate(&assignment, &format!("'{}'", path.display()))?;

        Ok(self.finish(
            table,
            assignment,
            Layout::HeaderRow { delimiter: ',' },
            InputFormat::Delimited,
        ))
    }

    /// Generic text: column sidecar first, then detection.
    pub fn parse_text(&self, path: &Path, text: &str) -> Result<ParsedFile> {
        match read_column_file(path)? {
            Some(columns) => self.parse_with_column_names(path, text, columns),
            None => self.parse_auto_detect(path, text),
        }
    }

    /// Headerless comma-delimited text with externally supplied names.
    ///
    /// Only header detection runs; the names are authoritative.
    pub fn parse_with_column_names(
        &self,
        path: &Path,
        text: &str,
        columns: Vec<String>,
    ) -> Result<ParsedFile> {
        debug!(columns = columns.len(), "using column file");
        let rows = fit_rows(read_records(text, b',')?, columns.len());
        if rows.is_empty() {
            return Err(ConvertError::EmptyData(format!(
                "'{}' has no rows",
                path.display()
            )));
        }

        let table = DataTable::new(columns, rows);
        let assignment = self.detector.detect_from_headers(&table.headers);
        self.detector.validate(
            &assignment,
            &format!("column file for '{}'", path.display()),
        )?;

        let layout = Layout::ColumnFile {
            columns: table.column_count(),
        };
        Ok(self.finish(table, assignment, layout, InputFormat::Text))
    }

    /// Try each candidate delimiter, then fixed-width segmentation.
    pub fn parse_auto_detect(&self, path: &Path, text: &str) -> Result<ParsedFile> {
        for &delimiter in CANDIDATE_DELIMITERS {
            let records = match read_records(text, delimiter) {
                Ok(records) if !records.is_empty() => records,
                Ok(_) => continue,
                Err(e) => {
                    debug!(
                        delimiter = %(delimiter as char).escape_default(),
                        error = %e,
                        "delimiter rejected"
                    );
                    continue;
                }
            };

            let mut table = DataTable::with_positional_names(POSITIONAL_PREFIX, records);
            let assignment = self.detector.detect_from_data(&table);
            let missing = self.detector.missing_roles(&assignment);
            if !missing.is_empty() {
                debug!(
                    delimiter = %(delimiter as char).escape_default(),
                    columns = table.column_count(),
                    missing = ?missing,
                    "delimiter rejected"
                );
                continue;
            }

            info!(delimiter = %(delimiter as char).escape_default(), "detected delimited layout");
            drop_embedded_header(&mut table, &assignment);
            let layout = Layout::Delimited {
                delimiter: delimiter as char,
            };
            return Ok(self.finish(table, assignment, layout, InputFormat::Text));
        }

        self.parse_fixed_width(path, text)
    }

    /// Segment fixed-width text and detect roles from the cells.
    pub fn parse_fixed_width(&self, path: &Path, text: &str) -> Result<ParsedFile> {
        let segmenter =
            FixedWidthSegmenter::with_sample_lines(self.config.fixed_width_sample_lines);
        let mut table = segmenter
            .segment(text)
            .ok_or_else(|| ConvertError::UndetectedLayout {
                path: path.to_path_buf(),
            })?;
        info!(columns = table.column_count(), "detected fixed-width layout");

        let assignment = self.detector.detect_from_data(&table);
        self.detector.validate(
            &assignment,
            &format!("fixed-width columns in '{}'", path.display()),
        )?;

        drop_embedded_header(&mut table, &assignment);
        let layout = Layout::FixedWidth {
            columns: table.column_count(),
        };
        Ok(self.finish(table, assignment, layout, InputFormat::Text))
    }

    fn finish(
        &self,
        table: DataTable,
        assignment: RoleAssignment,
        layout: Layout,
        format: InputFormat,
    ) -> ParsedFile {
        let (transactions, dropped_rows) = build_transactions(&table, &assignment);
        if dropped_rows > 0 {
            warn!(dropped_rows, "dropped rows missing required values");
        }
        info!(transactions = transactions.len(), "parsed transactions");

        ParsedFile {
            transactions,
            assignment,
            layout,
            format,
            dropped_rows,
        }
    }
}

impl Default for FileParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Read every non-blank record without treating any row as a header.
fn read_records(text: &str, delimiter: u8) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }
    Ok(rows)
}

/// Pad or truncate every row to `width` cells.
fn fit_rows(rows: Vec<Vec<String>>, width: usize) -> Vec<Vec<String>> {
    rows.into_iter()
        .map(|mut row| {
            row.resize(width, String::new());
            row
        })
        .collect()
}

fn is_header_row(row: &[String]) -> bool {
    row.iter().any(|cell| {
        let lower = cell.to_lowercase();
        lower.contains("date") || lower.contains("transaction")
    })
}

/// Drop a leading header line read as data.
///
/// Headerless detection sees a header line as one more row; its date cell
/// is a label rather than a date.
fn drop_embedded_header(table: &mut DataTable, assignment: &RoleAssignment) {
    let Some(index) = assignment
        .column_for(Role::Date)
        .and_then(|name| table.column_index(name))
    else {
        return;
    };

    let first = table.get(0, index).unwrap_or("");
    if !DataTable::is_null_value(first) && !classifiers::is_date(first) {
        debug!(cell = first, "dropping embedded header row");
        table.drop_first_row();
    }
}

/// Turn rows into transactions, counting rows that lack required values.
fn build_transactions(table: &DataTable, assignment: &RoleAssignment) -> (Vec<Transaction>, usize) {
    let columns: Vec<(Role, usize)> = assignment
        .iter()
        .filter_map(|(name, role, _)| table.column_index(name).map(|i| (role, i)))
        .collect();

    let mut transactions = Vec::with_capacity(table.row_count());
    let mut dropped = 0;

    for row in 0..table.row_count() {
        let fields = columns.iter().map(|&(role, index)| {
            let value = table.get(row, index).unwrap_or("");
            let value = if DataTable::is_null_value(value) { "" } else { value };
            (role, value)
        });

        match Transaction::from_fields(fields) {
            Some(tx) => transactions.push(tx),
            None => dropped += 1,
        }
    }

    (transactions, dropped)
}
