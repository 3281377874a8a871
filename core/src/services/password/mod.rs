//! Credential verification
//!
//! - `PasswordHasher` is the seam the lifecycle service hashes and verifies through
//! - `BcryptPasswordHasher` is the production implementation
//! - `validate_password_strength` enforces the password complexity policy

mod bcrypt_hasher;
mod policy;

#[cfg(test)]
mod tests;

use async_trait::async_trait;

use crate::errors::DomainError;

pub use bcrypt_hasher::{BcryptPasswordHasher, DEFAULT_BCRYPT_COST};
pub use policy::validate_password_strength;

/// One-way password hashing primitive
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext secret for storage
    async fn hash(&self, plaintext: &str) -> Result<String, DomainError>;

    /// Check a plaintext secret against a stored hash
    ///
    /// Returns `false` on mismatch and on a malformed stored hash; never errors.
    async fn verify(&self, plaintext: &str, stored_hash: &str) -> bool;

    /// Spend the cost of one verification without a stored hash
    ///
    /// Called when no identity matched so that unknown users and wrong
    /// passwords take the same time.
    async fn verify_absent(&self, plaintext: &str) {
        let _ = self.verify(plaintext, "").await;
    }
}
