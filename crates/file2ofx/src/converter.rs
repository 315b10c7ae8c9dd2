//! One-call conversion pipeline and its public API.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::input::{FileParser, InputFormat, Layout, ParsedFile, ParserConfig};
use crate::output::resolve_output_path;
use crate::schema::{Role, RoleSource};
use crate::statement::{StatementConfig, StatementGenerator};

/// Configuration for a conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Input reading and detection settings.
    pub parser: ParserConfig,
    /// Statement identity and balances.
    pub statement: StatementConfig,
}

impl ConversionConfig {
    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_statement(mut self, statement: StatementConfig) -> Self {
        self.statement = statement;
        self
    }
}

/// A column and the role it was given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnReport {
    pub column: String,
    pub role: Role,
    pub source: RoleSource,
}

/// Outcome of converting one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Format after auto resolution.
    pub format: InputFormat,
    pub layout: Layout,
    /// Column roles in assignment order: header roles first, then roles
    /// inferred from data.
    pub columns: Vec<ColumnReport>,
    pub transactions: usize,
    /// Rows skipped for missing required values.
    pub dropped_rows: usize,
}

/// Converts transaction exports into OFX statements.
pub struct Converter {
    config: ConversionConfig,
    parser: FileParser,
    generator: StatementGenerator,
}

impl Converter {
    /// Create a converter with default configuration.
    pub fn new() -> Self {
        Self::with_config(ConversionConfig::default())
    }

    /// Create a converter with custom configuration.
    pub fn with_config(config: ConversionConfig) -> Self {
        let parser = FileParser::with_config(config.parser.clone());
        Self {
            config,
            parser,
            generator: StatementGenerator::new(),
        }
    }

    /// Use a specific statement generator, e.g. one with a pinned timestamp.
    pub fn with_generator(mut self, generator: StatementGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Parse an input file without writing anything.
    pub fn parse(&self, input: impl AsRef<Path>) -> Result<ParsedFile> {
        self.parser.parse_file(input)
    }

    /// Convert `input` into a statement.
    ///
    /// Without an explicit `output`, the statement goes next to the input as
    /// `<stem>.ofx`, or the first free `<stem>_N.ofx`.
    pub fn convert(
        &self,
        input: impl AsRef<Path>,
        output: Option<&Path>,
    ) -> Result<ConversionReport> {
        let input = input.as_ref();
        let parsed = self.parse(input)?;

        let output = match output {
            Some(path) => path.to_path_buf(),
            None => resolve_output_path(input)?,
        };
        info!(path = %output.display(), "output path");

        self.generator
            .generate(&parsed.transactions, &output, &self.config.statement)?;

        let columns = parsed
            .assignment
            .iter()
            .map(|(column, role, source)| ColumnReport {
                column: column.to_string(),
                role,
                source,
            })
            .collect();

        Ok(ConversionReport {
            input: input.to_path_buf(),
            output,
            format: parsed.format,
            layout: parsed.layout,
            columns,
            transactions: parsed.transactions.len(),
            dropped_rows: parsed.dropped_rows,
        })
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}
