//! # Rotakey Core
//!
//! Domain layer of the Rotakey server: entities, repository interfaces,
//! the token codec and the token lifecycle service with refresh-token
//! reuse detection.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::{KeyRecordRepository, UserRepository};
pub use services::{
    validate_password_strength, AuthService, BcryptPasswordHasher, KeyManager, PasswordHasher,
    TokenCodec, TokenServiceConfig,
};
