//! In-memory key record store

use async_trait::async_trait;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use rk_core::domain::entities::key_record::{KeyRecord, KeySnapshot, RotationOutcome};
use rk_core::errors::DomainError;
use rk_core::repositories::KeyRecordRepository;

/// Key records held in a map behind a single lock
///
/// Rotation takes the write lock for the whole compare-and-swap, which
/// serializes concurrent refreshes of any identity.
#[derive(Default)]
pub struct InMemoryKeyRecordRepository {
    records: RwLock<HashMap<Uuid, KeyRecord>>,
}

impl InMemoryKeyRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl KeyRecordRepository for InMemoryKeyRecordRepository {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<KeyRecord>, DomainError> {
        Ok(self.records.read().await.get(&user_id).cloned())
    }

    async fn record_issued(
        &self,
        user_id: Uuid,
        token_digest: &str,
        signing_key: Option<KeySnapshot>,
    ) -> Result<KeyRecord, DomainError> {
        let mut records = self.records.write().await;

        let record = match records.entry(user_id) {
            Entry::Occupied(entry) => {
                let record = entry.into_mut();
                record.reissue(token_digest.to_string(), signing_key);
                record
            }
            Entry::Vacant(entry) => {
                entry.insert(KeyRecord::new(user_id, token_digest.to_string(), signing_key))
            }
        };

        tracing::debug!(user_id = %user_id, "Key record stored");
        Ok(record.clone())
    }

    async fn mark_redeemed_and_rotate(
        &self,
        user_id: Uuid,
        old_digest: &str,
        new_digest: &str,
    ) -> Result<RotationOutcome, DomainError> {
        let mut records = self.records.write().await;

        Ok(records
            .get_mut(&user_id)
            .map(|record| record.rotate(old_digest, new_digest.to_string()))
            .unwrap_or(RotationOutcome::Conflict))
    }

    async fn revoke(&self, user_id: Uuid) -> Result<bool, DomainError> {
        Ok(self.records.write().await.remove(&user_id).is_some())
    }
}
