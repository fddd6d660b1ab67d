//! Repository Module
//!
//! Plain async functions over the SQLite pool, one module per aggregate.

pub mod suffix;
pub mod vcard;

use thiserror::Error;

use crate::error::ServiceError;
use crate::utils::ErrorCode;
use crate::utils::validation::field_error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    /// A referenced row does not exist (reported against the input field)
    #[error("Invalid reference in {field}: {message}")]
    InvalidReference {
        field: &'static str,
        code: ErrorCode,
        message: String,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

impl From<RepoError> for ServiceError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::InvalidReference {
                field,
                code,
                message,
            } => ServiceError::App(field_error(code, field, message)),
            RepoError::Database(e) => ServiceError::from(e),
        }
    }
}
