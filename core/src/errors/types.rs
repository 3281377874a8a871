//! Authentication and token error types

use thiserror::Error;

use crate::domain::entities::token::TokenType;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown identity or wrong secret. Never says which.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// A refresh token was presented after it had already been redeemed,
    /// or lost a race against another redemption
    #[error("Suspicious activity detected. Please login again")]
    SuspiciousActivity,

    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Password must be at least 8 characters and contain a letter, a digit and one of @$!%*#?&")]
    WeakPassword,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Invalid token format")]
    Malformed,

    #[error("Wrong token type: expected {expected}, got {actual}")]
    WrongType { expected: TokenType, actual: TokenType },

    /// Token decoded fine but no live session knows it
    #[error("Token is not recognised")]
    UnknownToken,

    #[error("Failed to load signing keys: {message}")]
    KeyLoadError { message: String },

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    /// Whether this error belongs to the "invalid token" family returned to callers
    pub fn is_invalid_token(&self) -> bool {
        matches!(
            self,
            TokenError::Expired
                | TokenError::InvalidSignature
                | TokenError::Malformed
                | TokenError::WrongType { .. }
                | TokenError::UnknownToken
        )
    }
}
