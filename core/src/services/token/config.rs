//! Configuration for the token codec

use chrono::Duration;
use jsonwebtoken::Algorithm;
use rk_shared::JwtConfig;

use crate::domain::entities::token::{
    ACCESS_TOKEN_EXPIRY_MINUTES, JWT_AUDIENCE, JWT_ISSUER, REFRESH_TOKEN_EXPIRY_DAYS,
};
use crate::errors::{DomainError, TokenError};

/// Configuration for the token codec
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret, HMAC algorithms only
    pub jwt_secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// PEM private key path, asymmetric algorithms only
    pub private_key_path: Option<String>,
    /// PEM public key path, asymmetric algorithms only
    pub public_key_path: Option<String>,
    /// Access token lifetime
    pub access_token_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_token_ttl: Duration,
    /// Value of the `iss` claim
    pub issuer: String,
    /// Value of the `aud` claim
    pub audience: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
            private_key_path: None,
            public_key_path: None,
            access_token_ttl: Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES),
            refresh_token_ttl: Duration::days(REFRESH_TOKEN_EXPIRY_DAYS),
            issuer: JWT_ISSUER.to_string(),
            audience: JWT_AUDIENCE.to_string(),
        }
    }
}

impl TokenServiceConfig {
    /// Builds the codec configuration from the application's JWT settings
    pub fn from_jwt_config(jwt: &JwtConfig) -> Result<Self, DomainError> {
        let algorithm = parse_algorithm(&jwt.algorithm)?;
        let access_token_ttl = ttl_from_seconds("access_token_expiry", jwt.access_token_expiry)?;
        let refresh_token_ttl =
            ttl_from_seconds("refresh_token_expiry", jwt.refresh_token_expiry)?;

        Ok(Self {
            jwt_secret: jwt.secret.clone(),
            algorithm,
            private_key_path: jwt.private_key_path.clone(),
            public_key_path: jwt.public_key_path.clone(),
            access_token_ttl,
            refresh_token_ttl,
            issuer: jwt.issuer.clone(),
            audience: jwt.audience.clone(),
        })
    }

    /// HMAC configuration with the given secret
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: secret.into(),
            ..Default::default()
        }
    }
}

fn ttl_from_seconds(field: &str, seconds: i64) -> Result<Duration, DomainError> {
    Duration::try_seconds(seconds).ok_or_else(|| DomainError::Validation {
        message: format!("{field} is out of range: {seconds}"),
    })
}

/// Parses an algorithm name such as "RS256"
pub fn parse_algorithm(name: &str) -> Result<Algorithm, DomainError> {
    name.trim()
        .to_uppercase()
        .parse::<Algorithm>()
        .map_err(|_| {
            DomainError::Token(TokenError::KeyLoadError {
                message: format!("Unsupported JWT algorithm: {}", name),
            })
        })
}
