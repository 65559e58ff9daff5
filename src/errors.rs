/*!
 * Error types for the transrank application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to the translation service
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The request could not be sent or the connection dropped
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// The response body could not be decoded
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// The service answered with a non-success status
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Body returned by the service, if any
        message: String,
    },
}

/// Errors surfaced by the comparison and translation workflows
#[derive(Error, Debug)]
pub enum ComparisonError {
    /// Required input is missing; no request was sent
    #[error("{0}")]
    Validation(String),

    /// The remote call failed
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),
}

impl ComparisonError {
    /// Build a validation error from a user-facing message
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this error was detected locally, before any network call
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the translation service
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// Error from a comparison workflow
    #[error("Comparison error: {0}")]
    Comparison(#[from] ComparisonError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
