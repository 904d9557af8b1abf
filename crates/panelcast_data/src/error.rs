//! Error types for panelcast_data.

use thiserror::Error;

/// Result type alias using [`DataError`].
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur in panel data operations.
#[derive(Error, Debug)]
pub enum DataError {
    /// A referenced column does not exist in the frame.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// A column holds a different type than the operation requires.
    #[error("Type mismatch in column '{column}': expected {expected}")]
    TypeMismatch {
        /// The offending column name.
        column: String,
        /// The expected type description.
        expected: &'static str,
    },

    /// Column lengths disagree within one frame.
    #[error("Length mismatch: column '{column}' has {got} rows, frame has {expected}")]
    LengthMismatch {
        /// The offending column name.
        column: String,
        /// Rows the frame already holds.
        expected: usize,
        /// Rows the column supplied.
        got: usize,
    },

    /// The supplied table does not satisfy the declared schema, or paired
    /// train/test panels disagree on their entity sets.
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// A timestamp value could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// File format error.
    #[error("File format error: {0}")]
    FormatError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Core error.
    #[error("Core error: {0}")]
    Core(#[from] panelcast_core::CoreError),
}
