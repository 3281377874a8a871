//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{AuthError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// True for every error that means "the presented token is not usable"
    pub fn is_invalid_token(&self) -> bool {
        matches!(self, DomainError::Token(err) if err.is_invalid_token())
    }

    /// True when a refresh token was replayed or raced
    pub fn is_suspicious_activity(&self) -> bool {
        matches!(self, DomainError::Auth(AuthError::SuspiciousActivity))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
