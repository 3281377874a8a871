//! Authentication response value object for API responses.

use serde::{Deserialize, Serialize};

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::Role;

/// Authentication response containing tokens and user metadata
///
/// Returned by login and refresh. Contains:
/// - JWT access and refresh tokens
/// - Token expiration times
/// - The role of the authenticated identity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// JWT refresh token for obtaining new access tokens
    pub refresh_token: String,

    /// Always "bearer"
    pub token_type: String,

    /// Access token expiration time in seconds
    pub expires_in: i64,

    /// Refresh token expiration time in seconds
    pub refresh_expires_in: i64,

    /// Role of the authenticated identity
    pub role: Role,
}

impl AuthResponse {
    /// Creates an authentication response from a token pair and the user's role
    ///
    /// # Arguments
    ///
    /// * `token_pair` - The generated token pair
    /// * `role` - The user's role
    ///
    /// # Returns
    ///
    /// A new `AuthResponse` instance
    pub fn from_token_pair(token_pair: TokenPair, role: Role) -> Self {
        Self {
            access_token: token_pair.access_token,
            refresh_token: token_pair.refresh_token,
            token_type: "bearer".to_string(),
            expires_in: token_pair.access_expires_in,
            refresh_expires_in: token_pair.refresh_expires_in,
            role,
        }
    }
}
