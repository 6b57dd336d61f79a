//! Domain-specific error types and error handling.

mod types;

pub use types::TokenError;

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to the token taxonomy
    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Whether the error is a transient store fault worth retrying.
    ///
    /// Everything else collapses to a generic authentication failure
    /// at the crate boundary.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::Token(TokenError::StoreUnavailable { .. }))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
