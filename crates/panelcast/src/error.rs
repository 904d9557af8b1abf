//! Error types for the forecaster facade.

use thiserror::Error;

/// Result type alias using [`ForecastError`].
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur when training, predicting, or persisting a
/// forecaster.
#[derive(Error, Debug)]
pub enum ForecastError {
    /// Prediction or save attempted before training completed.
    #[error("Forecaster is not fitted yet")]
    NotFitted,

    /// Invalid forecaster configuration.
    #[error("Config error: {0}")]
    Config(String),

    /// Data error.
    #[error("Data error: {0}")]
    Data(#[from] panelcast_data::DataError),

    /// Core error, including engine errors passed through uninterpreted.
    #[error("Core error: {0}")]
    Core(#[from] panelcast_core::CoreError),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
