//! Column role inference: value classifiers and the column detector.

pub mod classifiers;
mod detector;

pub use detector::{ColumnAnalysis, ColumnDetector, DEFAULT_SAMPLE_LIMIT};
