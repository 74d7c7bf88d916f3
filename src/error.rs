//! Error types for trueno-eda operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trueno-eda operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A requested column name is absent from the dataset.
    #[error("Missing column: '{name}'")]
    MissingColumn {
        /// The column name that was looked up.
        name: String,
    },

    /// A font resource could not be loaded.
    #[error("Failed to load font resource '{}': {reason}", path.display())]
    ResourceLoad {
        /// Path that was requested.
        path: PathBuf,
        /// Why loading failed.
        reason: String,
    },

    /// A column does not hold the type an operation requires.
    #[error("Column '{column}' must be {expected}")]
    ColumnType {
        /// Column name.
        column: String,
        /// Human-readable description of the required type.
        expected: &'static str,
    },

    /// A column name was added twice.
    #[error("Duplicate column: '{0}'")]
    DuplicateColumn(String),

    /// An argument was outside its valid range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// CSV parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error with line number (0 when unknown).
    #[error("Configuration error at line {line}: {message}")]
    Config {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Invalid dimensions for framebuffer or plot.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Length mismatch between two sequences that must agree.
    #[error("Data length mismatch: expected {expected} elements, got {actual}")]
    DataLengthMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// Scale domain error.
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Rendering error.
    #[error("Rendering error: {0}")]
    Rendering(String),
}

impl Error {
    /// Shorthand for [`Error::MissingColumn`].
    pub(crate) fn missing_column(name: &str) -> Self {
        Self::MissingColumn { name: name.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_display() {
        let err = Error::missing_column("region");
        assert!(err.to_string().contains("region"));
    }

    #[test]
    fn test_resource_load_display() {
        let err = Error::ResourceLoad {
            path: PathBuf::from("../data/ipaexg.ttf"),
            reason: "No such file or directory".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("ipaexg.ttf"));
        assert!(msg.contains("No such file"));
    }

    #[test]
    fn test_data_length_mismatch() {
        let err = Error::DataLengthMismatch { expected: 10, actual: 20 };
        assert!(err.to_string().contains("10"));
        assert!(err.to_string().contains("20"));
    }
}
