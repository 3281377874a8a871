//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT signing and password hashing configuration
//! - `database` - Key record / identity store configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig, MAX_TOKEN_EXPIRY_SECONDS};
pub use database::{DatabaseConfig, StoreBackend};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::new("127.0.0.1", 8080),
            database: DatabaseConfig::in_memory(),
            auth: AuthConfig::default(),
            cors: CorsConfig::development(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::new("0.0.0.0", 8080),
            database: DatabaseConfig::new("mysql://prod-db:3306/rotakey")
                .with_max_connections(50),
            // The secret must come from ROTAKEY__AUTH__JWT__SECRET
            auth: AuthConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Create the default configuration for a given environment
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::production();
                config.environment = Environment::Staging;
                config.logging = LoggingConfig::for_environment(Environment::Staging);
                config
            }
        }
    }

    /// Load configuration defaults from the `ENVIRONMENT` variable
    pub fn from_env() -> Self {
        Self::for_environment(Environment::from_env())
    }

    /// Check the configuration for settings that must never reach production
    ///
    /// # Returns
    /// * `Ok(())` - Configuration is acceptable for its environment
    /// * `Err(String)` - Human-readable description of the problem
    pub fn validate(&self) -> Result<(), String> {
        if self.environment.is_production() && self.auth.jwt.is_using_default_secret() {
            return Err("JWT secret must be configured in production".to_string());
        }
        if self.auth.jwt.access_token_expiry <= 0 || self.auth.jwt.refresh_token_expiry <= 0 {
            return Err("Token expiry values must be positive".to_string());
        }
        if self.auth.jwt.refresh_token_expiry > MAX_TOKEN_EXPIRY_SECONDS {
            return Err(format!(
                "Token expiry values must not exceed {MAX_TOKEN_EXPIRY_SECONDS} seconds"
            ));
        }
        if self.auth.jwt.access_token_expiry >= self.auth.jwt.refresh_token_expiry {
            return Err("Access tokens must expire before refresh tokens".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_defaults_use_memory_store() {
        let config = AppConfig::development();
        assert_eq!(config.database.backend, StoreBackend::Memory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_production_rejects_default_secret() {
        let mut config = AppConfig::production();
        config.auth.jwt.secret = JwtConfig::default().secret;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_access_expiry_must_be_shorter_than_refresh() {
        let mut config = AppConfig::development();
        config.auth.jwt.access_token_expiry = config.auth.jwt.refresh_token_expiry;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_expiry_has_upper_bound() {
        let mut config = AppConfig::development();
        config.auth.jwt.refresh_token_expiry = 10_000_000_000_000;
        assert!(config.validate().is_err());

        config.auth.jwt.refresh_token_expiry = MAX_TOKEN_EXPIRY_SECONDS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_staging_inherits_production_store() {
        let config = AppConfig::for_environment(Environment::Staging);
        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.database.backend, StoreBackend::MySql);
    }
}
