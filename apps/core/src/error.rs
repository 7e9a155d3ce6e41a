use std::io;
use thiserror::Error;

use crate::catalog::messages::CatalogError;

/// Application-wide error type, consolidating all possible errors into a single enum.
///
/// The scoring engine itself is infallible; these variants surface from
/// configuration loading and from the keyword catalog boundary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents data validation errors (e.g., blank keyword text, negative CPC).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A single-record operation targeted an id the catalog does not hold.
    #[error("Keyword not found: {0}")]
    NotFound(String),

    /// Represents configuration-related errors (e.g., malformed tier table).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents failures talking to the catalog task.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents errors from operations that did not complete in time.
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Represents unexpected internal errors that indicate a bug.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            AppError::Validation(s) => AppError::Validation(s.clone()),
            AppError::NotFound(s) => AppError::NotFound(s.clone()),
            AppError::Config(s) => AppError::Config(s.clone()),
            AppError::Catalog(e) => AppError::Catalog(e.clone()),
            AppError::Io(e) => AppError::Io(io::Error::new(e.kind(), e.to_string())),
            AppError::Timeout(s) => AppError::Timeout(s.clone()),
            AppError::Internal(s) => AppError::Internal(s.clone()),
        }
    }
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        AppError::Timeout(format!("Catalog did not answer in time: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Config(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}
