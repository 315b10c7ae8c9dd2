//! Column-name sidecar (`<input>.cols`).

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};

/// Extension of the sidecar that names the columns of a headerless file.
pub const COLUMN_FILE_EXTENSION: &str = "cols";

/// Path of the sidecar for an input file.
pub fn column_file_path(input: &Path) -> PathBuf {
    input.with_extension(COLUMN_FILE_EXTENSION)
}

/// Read the column names for `input`, if a sidecar exists.
///
/// A missing sidecar is `Ok(None)`. One that exists but is empty or
/// unreadable is an error.
pub fn read_column_file(input: &Path) -> Result<Option<Vec<String>>> {
    let path = column_file_path(input);
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ConvertError::SchemaFile {
                path,
                message: e.to_string(),
            });
        }
    };

    let line = contents.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let columns = parse_column_line(line).map_err(|e| ConvertError::SchemaFile {
        path: path.clone(),
        message: e.to_string(),
    })?;
    if columns.iter().all(|c| c.is_empty()) {
        return Err(ConvertError::SchemaFile {
            path,
            message: "no column names found".to_string(),
        });
    }

    Ok(Some(columns))
}

/// Split one comma-separated line of column names.
///
/// Quoting follows CSV rules; names are trimmed.
pub fn parse_column_line(line: &str) -> csv::Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(line.trim().as_bytes());

    match reader.records().next() {
        Some(record) => Ok(record?.iter().map(str::to_string).collect()),
        None => Ok(Vec::new()),
    }
}
