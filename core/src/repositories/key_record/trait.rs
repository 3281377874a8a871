//! Key record repository trait defining the interface for session state persistence.
//!
//! A key record holds the fingerprint of the one live refresh token for an
//! identity together with a bounded history of fingerprints already redeemed.
//! Implementations must make `mark_redeemed_and_rotate` atomic: it is the only
//! thing standing between two concurrent refresh requests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::key_record::{KeyRecord, KeySnapshot, RotationOutcome};
use crate::errors::DomainError;

/// Repository trait for KeyRecord persistence operations
///
/// All token arguments are SHA-256 fingerprints, never raw tokens.
/// Infrastructure failures are reported as `DomainError::StoreUnavailable`.
#[async_trait]
pub trait KeyRecordRepository: Send + Sync {
    /// Find the key record of an identity
    ///
    /// # Returns
    /// * `Ok(Some(KeyRecord))` - Record found
    /// * `Ok(None)` - No live session for the identity
    /// * `Err(DomainError)` - Store error occurred
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<KeyRecord>, DomainError>;

    /// Upsert the record after a login
    ///
    /// Sets `current_refresh_token` and the key snapshot. An existing redeemed
    /// history is preserved.
    ///
    /// # Arguments
    /// * `user_id` - Identity the session belongs to
    /// * `token_digest` - Fingerprint of the newly issued refresh token
    /// * `signing_key` - Public key snapshot, asymmetric signing only
    ///
    /// # Returns
    /// * `Ok(KeyRecord)` - The record as stored
    /// * `Err(DomainError)` - Store error occurred
    async fn record_issued(
        &self,
        user_id: Uuid,
        token_digest: &str,
        signing_key: Option<KeySnapshot>,
    ) -> Result<KeyRecord, DomainError>;

    /// Atomically redeem `old_digest` and install `new_digest`
    ///
    /// Succeeds only if `old_digest` is the current token at the moment the
    /// update is applied. On success `old_digest` is appended to the redeemed
    /// history (evicting the oldest entry past capacity). On precondition
    /// failure, including a missing record, nothing is mutated.
    ///
    /// # Returns
    /// * `Ok(RotationOutcome::Rotated)` - Swap applied
    /// * `Ok(RotationOutcome::Conflict)` - Current token did not match
    /// * `Err(DomainError)` - Store error occurred; no partial update
    async fn mark_redeemed_and_rotate(
        &self,
        user_id: Uuid,
        old_digest: &str,
        new_digest: &str,
    ) -> Result<RotationOutcome, DomainError>;

    /// Check whether a fingerprint is in the redeemed history
    async fn contains_redeemed(&self, user_id: Uuid, token_digest: &str) -> Result<bool, DomainError> {
        Ok(self
            .find_by_user_id(user_id)
            .await?
            .map(|record| record.has_redeemed(token_digest))
            .unwrap_or(false))
    }

    /// Delete the record of an identity
    ///
    /// # Returns
    /// * `Ok(true)` - A record existed and was deleted
    /// * `Ok(false)` - Nothing to delete
    /// * `Err(DomainError)` - Store error occurred
    async fn revoke(&self, user_id: Uuid) -> Result<bool, DomainError>;
}
