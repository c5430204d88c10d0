//! Common error types for the Stress Detection service

use thiserror::Error;

/// Common result type for service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across service layers
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Audio decoding failure
    #[error("Decode error: {0}")]
    Decode(String),

    /// Feature extraction failure
    #[error("Feature extraction error: {0}")]
    Extraction(String),

    /// Artifact application failure (scaler/classifier)
    #[error("Model error: {0}")]
    Model(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
