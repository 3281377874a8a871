//! Authentication service module
//!
//! This module provides the token lifecycle:
//! - Password login issuing the first token pair
//! - Refresh token rotation with reuse detection
//! - Logout and password change revoking the session
//! - User registration

mod service;

#[cfg(test)]
mod tests;

pub use service::AuthService;
