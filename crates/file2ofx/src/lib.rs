//! file2ofx: convert bank transaction exports into OFX statements.
//!
//! Input can be delimited text with a header row, headerless delimited text
//! or fixed-width text. Column roles (date, amount, debit, credit,
//! description, type) are inferred from header names and, where those are
//! not enough, from sampled cell values.
//!
//! # Example
//!
//! ```no_run
//! use file2ofx::{ConversionConfig, Converter, StatementConfig};
//!
//! let config = ConversionConfig::default()
//!     .with_statement(StatementConfig::default().with_currency("EUR"));
//! let report = Converter::with_config(config)
//!     .convert("transactions.csv", None)
//!     .unwrap();
//!
//! println!("{} transactions -> {}", report.transactions, report.output.display());
//! ```

pub mod error;
pub mod inference;
pub mod input;
pub mod output;
pub mod schema;
pub mod statement;

mod converter;

pub use converter::{ColumnReport, ConversionConfig, ConversionReport, Converter};
pub use error::{ConvertError, Result};
pub use inference::ColumnDetector;
pub use input::{DataTable, FileParser, InputFormat, Layout, ParsedFile, ParserConfig, TextEncoding};
pub use schema::{Role, RoleAssignment, RoleSource, Transaction};
pub use statement::{AccountType, StatementConfig, StatementGenerator};
