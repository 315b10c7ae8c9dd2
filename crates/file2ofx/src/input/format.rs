//! Input format and text encoding selection.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, Result};

/// How the input file should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    /// Decide from the extension and first line.
    #[default]
    Auto,
    /// Delimited text with a header row somewhere near the top.
    Delimited,
    /// Generic text: column sidecar, candidate delimiters, then fixed width.
    Text,
}

impl InputFormat {
    /// Resolve `Auto` into a concrete format.
    ///
    /// `.csv` is delimited. `.txt` is delimited when its first line holds a
    /// comma. Anything else is generic text.
    pub fn resolve(self, path: &Path, contents: &str) -> InputFormat {
        if self != InputFormat::Auto {
            return self;
        }

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => InputFormat::Delimited,
            "txt" => {
                let first_line = contents.lines().next().unwrap_or("");
                if first_line.contains(',') {
                    InputFormat::Delimited
                } else {
                    InputFormat::Text
                }
            }
            _ => InputFormat::Text,
        }
    }
}

impl FromStr for InputFormat {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(InputFormat::Auto),
            "csv" | "delimited" => Ok(InputFormat::Delimited),
            "txt" | "text" => Ok(InputFormat::Text),
            other => Err(ConvertError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputFormat::Auto => "auto",
            InputFormat::Delimited => "csv",
            InputFormat::Text => "txt",
        };
        f.write_str(name)
    }
}

/// Text encoding of the input bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextEncoding {
    #[default]
    Utf8,
    /// ISO-8859-1: every byte maps to the code point of the same value.
    Latin1,
}

impl TextEncoding {
    /// Decode raw file bytes.
    pub fn decode(&self, bytes: &[u8], path: &Path) -> Result<String> {
        match self {
            TextEncoding::Utf8 => {
                let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
                String::from_utf8(bytes.to_vec()).map_err(|e| {
                    ConvertError::io(
                        path,
                        std::io::Error::new(std::io::ErrorKind::InvalidData, e),
                    )
                })
            }
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
        }
    }
}

impl FromStr for TextEncoding {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "utf-8" | "utf8" | "utf-8-sig" => Ok(TextEncoding::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" => Ok(TextEncoding::Latin1),
            other => Err(ConvertError::UnsupportedEncoding(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_extension() {
        let auto = InputFormat::Auto;
        assert_eq!(auto.resolve(Path::new("a.CSV"), "x y"), InputFormat::Delimited);
        assert_eq!(auto.resolve(Path::new("a.txt"), "a,b\n1,2"), InputFormat::Delimited);
        assert_eq!(auto.resolve(Path::new("a.txt"), "a\tb\n1\t2"), InputFormat::Text);
        assert_eq!(auto.resolve(Path::new("a.dat"), "a,b"), InputFormat::Text);
        assert_eq!(InputFormat::Text.resolve(Path::new("a.csv"), ""), InputFormat::Text);
    }

    #[test]
    fn test_parse_format_names() {
        assert_eq!("CSV".parse::<InputFormat>().unwrap(), InputFormat::Delimited);
        assert_eq!("txt".parse::<InputFormat>().unwrap(), InputFormat::Text);
        assert!("xlsx".parse::<InputFormat>().is_err());
    }

    #[test]
    fn test_decode_utf8_strips_bom() {
        let text = TextEncoding::Utf8
            .decode(b"\xEF\xBB\xBFDate,Amount", Path::new("x.csv"))
            .unwrap();
        assert_eq!(text, "Date,Amount");
    }

    #[test]
    fn test_decode_latin1() {
        let text = TextEncoding::Latin1
            .decode(b"Caf\xE9", Path::new("x.csv"))
            .unwrap();
        assert_eq!(text, "Café");
    }

    #[test]
    fn test_invalid_utf8_is_error() {
        assert!(TextEncoding::Utf8.decode(b"Caf\xE9", Path::new("x.csv")).is_err());
        assert!(matches!(
            "cp1252".parse::<TextEncoding>(),
            Err(ConvertError::UnsupportedEncoding(_))
        ));
    }
}
