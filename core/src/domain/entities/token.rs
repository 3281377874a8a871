//! Token entities for JWT-based authentication.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::user::Role;
use crate::errors::TokenError;

/// Access token expiration time (15 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Refresh token expiration time (7 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// JWT issuer
pub const JWT_ISSUER: &str = "rotakey";

/// JWT audience
pub const JWT_AUDIENCE: &str = "rotakey-api";

/// Type tag carried by every token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenType::Access => write!(f, "access"),
            TokenType::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Token type tag
    #[serde(rename = "type")]
    pub token_type: TokenType,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,

    /// Role of the subject, access tokens only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl Claims {
    /// Creates new claims expiring `ttl` from now
    ///
    /// # Arguments
    ///
    /// * `user_id` - The subject's UUID
    /// * `token_type` - Access or refresh
    /// * `ttl` - Lifetime of the token; negative values produce an already expired token
    /// * `issuer` - Value of the `iss` claim
    /// * `audience` - Value of the `aud` claim
    ///
    /// # Returns
    ///
    /// `Err(TokenError::TokenGenerationFailed)` when `now + ttl` is out of range
    pub fn new(
        user_id: Uuid,
        token_type: TokenType,
        ttl: Duration,
        issuer: &str,
        audience: &str,
    ) -> Result<Self, TokenError> {
        let now = Utc::now();
        let expiry = now
            .checked_add_signed(ttl)
            .ok_or(TokenError::TokenGenerationFailed)?;

        Ok(Self {
            sub: user_id.to_string(),
            token_type,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
            role: None,
        })
    }

    /// Attaches the subject's role
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Checks if the claims have expired
    ///
    /// # Returns
    ///
    /// `true` once `now >= exp`
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets the user ID from the claims
    ///
    /// # Returns
    ///
    /// `Ok(Uuid)` if the subject can be parsed as a UUID, `Err` otherwise
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Token pair containing access and refresh tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token expiration time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiration time in seconds
    pub refresh_expires_in: i64,
}

/// Identity extracted from a verified access token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub role: Role,
}

/// SHA-256 hex fingerprint of a raw token. Only fingerprints are ever stored.
pub fn fingerprint(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Short prefix of a fingerprint, safe to put in log lines
pub fn fingerprint_prefix(digest: &str) -> &str {
    digest.get(..12).unwrap_or(digest)
}
