//! Mock implementation of KeyRecordRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::key_record::{KeyRecord, KeySnapshot, RotationOutcome};
use crate::errors::DomainError;

use super::r#trait::KeyRecordRepository;

/// Mock key record repository for testing
#[derive(Default)]
pub struct MockKeyRecordRepository {
    records: Arc<RwLock<HashMap<Uuid, KeyRecord>>>,
    unavailable: AtomicBool,
    lookups: AtomicUsize,
}

impl MockKeyRecordRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail as if the store were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of `find_by_user_id` calls so far
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::StoreUnavailable {
                message: "mock store offline".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl KeyRecordRepository for MockKeyRecordRepository {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<KeyRecord>, DomainError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        let records = self.records.read().await;
        Ok(records.get(&user_id).cloned())
    }

    async fn record_issued(
        &self,
        user_id: Uuid,
        token_digest: &str,
        signing_key: Option<KeySnapshot>,
    ) -> Result<KeyRecord, DomainError> {
        self.check_available()?;
        let mut records = self.records.write().await;

        let record = records
            .entry(user_id)
            .and_modify(|r| r.reissue(token_digest.to_string(), signing_key.clone()))
            .or_insert_with(|| KeyRecord::new(user_id, token_digest.to_string(), signing_key));

        Ok(record.clone())
    }

    async fn mark_redeemed_and_rotate(
        &self,
        user_id: Uuid,
        old_digest: &str,
        new_digest: &str,
    ) -> Result<RotationOutcome, DomainError> {
        self.check_available()?;
        let mut records = self.records.write().await;

        match records.get_mut(&user_id) {
            Some(record) => Ok(record.rotate(old_digest, new_digest.to_string())),
            None => Ok(RotationOutcome::Conflict),
        }
    }

    async fn revoke(&self, user_id: Uuid) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut records = self.records.write().await;
        Ok(records.remove(&user_id).is_some())
    }
}
