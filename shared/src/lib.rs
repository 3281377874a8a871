//! Shared configuration and response types for the Rotakey server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types (server, database, auth, logging)
//! - The JSON error envelope returned by every endpoint

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    LogFormat, LoggingConfig, ServerConfig, StoreBackend,
};
pub use errors::{error_codes, ErrorResponse};
