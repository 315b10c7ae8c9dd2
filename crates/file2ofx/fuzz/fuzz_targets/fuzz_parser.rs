//! Fuzz target for the file parser.
//!
//! Feeds arbitrary bytes through every input path (headed CSV, generic text
//! with delimiter and fixed-width detection) and checks nothing panics.

#![no_main]

use libfuzzer_sys::fuzz_target;
use file2ofx::{FileParser, InputFormat, ParserConfig, TextEncoding};
use std::io::Write;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    for suffix in [".csv", ".txt", ".dat"] {
        if let Ok(mut temp_file) = tempfile::NamedTempFile::with_suffix(suffix) {
            if temp_file.write_all(data).is_ok() {
                let _ = FileParser::new().parse_file(temp_file.path());
            }
        }
    }

    if let Ok(mut temp_file) = tempfile::NamedTempFile::new() {
        if temp_file.write_all(data).is_ok() {
            let config = ParserConfig::default()
                .with_format(InputFormat::Text)
                .with_encoding(TextEncoding::Latin1);
            let _ = FileParser::with_config(config).parse_file(temp_file.path());
        }
    }
});
