//! Output path selection.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConvertError, Result};

/// Extension of generated statements.
pub const OUTPUT_EXTENSION: &str = "ofx";

/// Highest numeric suffix tried before giving up.
pub const MAX_SUFFIX: usize = 99;

/// Default statement path for an input: same directory and stem, `.ofx`.
pub fn default_output_path(input: &Path) -> Result<PathBuf> {
    if input.file_stem().is_none() {
        return Err(ConvertError::UnsupportedFormat(format!(
            "cannot derive an output name from '{}'",
            input.display()
        )));
    }
    Ok(input.with_extension(OUTPUT_EXTENSION))
}

/// First free path among `base`, `<stem>_1.<ext>` .. `<stem>_99.<ext>`.
pub fn unique_output_path(base: &Path) -> Result<PathBuf> {
    if !base.exists() {
        return Ok(base.to_path_buf());
    }

    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = base
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| OUTPUT_EXTENSION.to_string());

    for n in 1..=MAX_SUFFIX {
        let candidate = base.with_file_name(format!("{}_{}.{}", stem, n, extension));
        if !candidate.exists() {
            debug!(path = %candidate.display(), "output name taken, using suffix");
            return Ok(candidate);
        }
    }

    Err(ConvertError::OutputNameExhausted {
        base: base.to_path_buf(),
        attempts: MAX_SUFFIX,
    })
}

/// Free output path derived from `input`.
pub fn resolve_output_path(input: &Path) -> Result<PathBuf> {
    unique_output_path(&default_output_path(input)?)
}
