//! Input parsing: formats, encodings, column files and layout detection.

mod fixed_width;
mod format;
mod parser;
mod schema_file;
mod source;

pub use fixed_width::{FixedWidthSegmenter, Span};
pub use format::{InputFormat, TextEncoding};
pub use parser::{FileParser, Layout, ParsedFile, ParserConfig};
pub use schema_file::{COLUMN_FILE_EXTENSION, column_file_path, parse_column_line, read_column_file};
pub use source::DataTable;
