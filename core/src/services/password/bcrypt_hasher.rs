//! bcrypt-backed password hasher

use async_trait::async_trait;

use crate::errors::DomainError;

use super::PasswordHasher;

/// Work factor used when none is configured
pub const DEFAULT_BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;

/// Password hasher running bcrypt on the blocking thread pool
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
    /// Hash of a throwaway password at the same cost, for `verify_absent`
    dummy_hash: String,
}

impl BcryptPasswordHasher {
    /// Creates a hasher with the given work factor (4..=31)
    pub fn new(cost: u32) -> Result<Self, DomainError> {
        let dummy_hash = bcrypt::hash("rotakey-timing-equalizer", cost).map_err(|e| {
            DomainError::Internal {
                message: format!("Invalid bcrypt cost {}: {}", cost, e),
            }
        })?;

        Ok(Self { cost, dummy_hash })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, plaintext: &str) -> Result<String, DomainError> {
        let plaintext = plaintext.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing task failed: {}", e),
            })?
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing failed: {}", e),
            })
    }

    async fn verify(&self, plaintext: &str, stored_hash: &str) -> bool {
        let plaintext = plaintext.to_string();
        let stored_hash = stored_hash.to_string();

        match tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &stored_hash)).await {
            Ok(Ok(matches)) => matches,
            Ok(Err(e)) => {
                tracing::debug!(error = %e, "Stored password hash could not be parsed");
                false
            }
            Err(e) => {
                tracing::error!(error = %e, "Password verification task failed");
                false
            }
        }
    }

    async fn verify_absent(&self, plaintext: &str) {
        let _ = self.verify(plaintext, &self.dummy_hash).await;
    }
}
