//! Authentication configuration: token signing and password hashing

use serde::{Deserialize, Serialize};

const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";

/// Upper bound for any token lifetime (one year)
pub const MAX_TOKEN_EXPIRY_SECONDS: i64 = 365 * 86400;

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared secret for HMAC algorithms
    pub secret: String,

    /// Algorithm for JWT signing (HS256, RS256, ES256, ...)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// PEM private key path for asymmetric algorithms
    #[serde(default)]
    pub private_key_path: Option<String>,

    /// PEM public key path for asymmetric algorithms
    #[serde(default)]
    pub public_key_path: Option<String>,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            algorithm: default_algorithm(),
            private_key_path: None,
            public_key_path: None,
            access_token_expiry: 900,      // 15 minutes
            refresh_token_expiry: 604800,  // 7 days
            issuer: String::from("rotakey"),
            audience: String::from("rotakey-api"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Switch to an asymmetric algorithm backed by PEM key files
    pub fn with_key_files(
        mut self,
        algorithm: impl Into<String>,
        private_key_path: impl Into<String>,
        public_key_path: impl Into<String>,
    ) -> Self {
        self.algorithm = algorithm.into();
        self.private_key_path = Some(private_key_path.into());
        self.public_key_path = Some(public_key_path.into());
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.algorithm.to_uppercase().starts_with("HS") && self.secret == DEFAULT_SECRET
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// bcrypt work factor for password hashes
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl AuthConfig {
    /// Get access token expiry in seconds
    pub fn access_token_expiry_seconds(&self) -> i64 {
        self.jwt.access_token_expiry
    }

    /// Get refresh token expiry in seconds
    pub fn refresh_token_expiry_seconds(&self) -> i64 {
        self.jwt.refresh_token_expiry
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_bcrypt_cost() -> u32 {
    12
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_secret_detection() {
        assert!(JwtConfig::default().is_using_default_secret());
        assert!(!JwtConfig::new("a-real-secret").is_using_default_secret());
    }

    #[test]
    fn test_asymmetric_config_ignores_secret() {
        let config = JwtConfig::default().with_key_files("RS256", "private.pem", "public.pem");
        assert!(!config.is_using_default_secret());
        assert_eq!(config.private_key_path.as_deref(), Some("private.pem"));
    }

    #[test]
    fn test_expiry_builders() {
        let config = JwtConfig::default()
            .with_access_expiry_minutes(30)
            .with_refresh_expiry_days(14);
        assert_eq!(config.access_token_expiry, 1800);
        assert_eq!(config.refresh_token_expiry, 14 * 86400);
    }
}
