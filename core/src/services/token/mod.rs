//! Token module for JWT management
//!
//! This module handles:
//! - Signing key loading (HMAC, RSA, ECDSA)
//! - Access and refresh token minting
//! - Token verification with type checks

mod codec;
mod config;
mod key_manager;

#[cfg(test)]
pub(crate) mod tests;

pub use codec::TokenCodec;
pub use config::{parse_algorithm, TokenServiceConfig};
pub use key_manager::{KeyFamily, KeyManager};
