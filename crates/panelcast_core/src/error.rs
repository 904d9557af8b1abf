//! Error types for panelcast_core.

use thiserror::Error;

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core errors that can occur in panelcast_core operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// No scaler was ever fit for the requested entity index.
    #[error("No scaler fit for entity index {index}")]
    MissingScaler {
        /// The entity index the inverse transform was requested for.
        index: usize,
    },

    /// A scaler was given a value block with no rows.
    #[error("Empty value block: {0}")]
    EmptyBlock(String),

    /// A scaler was used before being fit.
    #[error("Scaler used before fit")]
    ScalerNotFitted,

    /// Block width differs between fit and transform.
    #[error("Invalid shape: expected {expected}, got {got}")]
    InvalidShape {
        /// Expected shape description.
        expected: String,
        /// Actual shape description.
        got: String,
    },

    /// An error surfaced by an engine implementation, passed through
    /// uninterpreted.
    #[error("Engine error: {0}")]
    Engine(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
