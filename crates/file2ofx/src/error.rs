//! Error types for the file2ofx library.

use std::path::PathBuf;
use thiserror::Error;

use crate::schema::Role;

/// Main error type for conversion operations.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data to convert.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Input path exists but is not a regular file.
    #[error("Not a file: {0}")]
    NotAFile(PathBuf),

    /// Requested input format is not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Requested text encoding is not supported.
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// The column-name sidecar exists but cannot be used.
    #[error("Invalid column file '{path}': {message}")]
    SchemaFile { path: PathBuf, message: String },

    /// No row in a delimited file looks like a header row.
    #[error("Could not find header row in '{path}'")]
    HeaderNotFound { path: PathBuf },

    /// Column detection finished without the roles a statement needs.
    #[error("Missing required columns ({context}): {}", format_roles(.missing))]
    MissingRoles { context: String, missing: Vec<Role> },

    /// Neither a candidate delimiter nor fixed-width segmentation produced usable columns.
    #[error("Could not detect a column layout in '{path}'")]
    UndetectedLayout { path: PathBuf },

    /// Statement generation was asked to write zero transactions.
    #[error("No transactions to convert")]
    NoTransactions,

    /// Every numbered variant of the output name is already taken.
    #[error("Could not generate unique filename for '{base}' after {attempts} attempts")]
    OutputNameExhausted { base: PathBuf, attempts: usize },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConvertError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }
}

fn format_roles(roles: &[Role]) -> String {
    roles
        .iter()
        .map(|r| r.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
