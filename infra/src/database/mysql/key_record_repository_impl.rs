//! MySQL implementation of KeyRecordRepository
//!
//! Rotation runs in a single transaction: the row is locked with
//! `SELECT ... FOR UPDATE` and the update is conditioned on the expected
//! current token, so two concurrent refreshes of the same token cannot both
//! commit.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use rk_core::domain::entities::key_record::{
    KeyRecord, KeySnapshot, RedeemedTokens, RotationOutcome,
};
use rk_core::errors::DomainError;
use rk_core::repositories::KeyRecordRepository;

use crate::database::{decode_error, store_error};

/// MySQL implementation of the key record repository
pub struct MySqlKeyRecordRepository {
    pool: MySqlPool,
}

impl MySqlKeyRecordRepository {
    /// Create a new MySQL key record repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a KeyRecord
    fn row_to_record(row: &MySqlRow) -> Result<KeyRecord, DomainError> {
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| decode_error("user_id", e))?;
        let user_id = Uuid::parse_str(&user_id).map_err(|e| decode_error("user_id", e))?;

        let current_refresh_token: String = row
            .try_get("current_refresh_token")
            .map_err(|e| decode_error("current_refresh_token", e))?;

        let redeemed_json: String = row
            .try_get("redeemed_tokens")
            .map_err(|e| decode_error("redeemed_tokens", e))?;
        let redeemed_tokens = decode_history(&redeemed_json)?;

        let key_id: Option<String> = row.try_get("key_id").map_err(|e| decode_error("key_id", e))?;
        let key_algorithm: Option<String> = row
            .try_get("key_algorithm")
            .map_err(|e| decode_error("key_algorithm", e))?;
        let public_key_pem: Option<String> = row
            .try_get("public_key_pem")
            .map_err(|e| decode_error("public_key_pem", e))?;

        let signing_key = match (key_id, key_algorithm, public_key_pem) {
            (Some(key_id), Some(algorithm), Some(public_key_pem)) => Some(KeySnapshot {
                key_id,
                algorithm,
                public_key_pem,
            }),
            _ => None,
        };

        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| decode_error("created_at", e))?;
        let updated_at: DateTime<Utc> = row
            .try_get("updated_at")
            .map_err(|e| decode_error("updated_at", e))?;

        Ok(KeyRecord {
            user_id,
            current_refresh_token,
            redeemed_tokens,
            signing_key,
            created_at,
            updated_at,
        })
    }
}

fn decode_history(json: &str) -> Result<RedeemedTokens, DomainError> {
    let entries: Vec<String> =
        serde_json::from_str(json).map_err(|e| decode_error("redeemed_tokens", e))?;
    Ok(RedeemedTokens::from_vec(entries))
}

fn encode_history(history: &RedeemedTokens) -> Result<String, DomainError> {
    serde_json::to_string(history).map_err(|e| DomainError::Internal {
        message: format!("Failed to encode redeemed tokens: {}", e),
    })
}

#[async_trait]
impl KeyRecordRepository for MySqlKeyRecordRepository {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<KeyRecord>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, current_refresh_token, redeemed_tokens,
                   key_id, key_algorithm, public_key_pem, created_at, updated_at
            FROM key_records
            WHERE user_id = ?
            "#,
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("Failed to load key record", e))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn record_issued(
        &self,
        user_id: Uuid,
        token_digest: &str,
        signing_key: Option<KeySnapshot>,
    ) -> Result<KeyRecord, DomainError> {
        let now = Utc::now();
        let (key_id, key_algorithm, public_key_pem) = match signing_key {
            Some(snapshot) => (
                Some(snapshot.key_id),
                Some(snapshot.algorithm),
                Some(snapshot.public_key_pem),
            ),
            None => (None, None, None),
        };

        sqlx::query(
            r#"
            INSERT INTO key_records (
                user_id, current_refresh_token, redeemed_tokens,
                key_id, key_algorithm, public_key_pem, created_at, updated_at
            ) VALUES (?, ?, '[]', ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                current_refresh_token = VALUES(current_refresh_token),
                key_id = VALUES(key_id),
                key_algorithm = VALUES(key_algorithm),
                public_key_pem = VALUES(public_key_pem),
                updated_at = VALUES(updated_at)
            "#,
        )
        .bind(user_id.to_string())
        .bind(token_digest)
        .bind(key_id)
        .bind(key_algorithm)
        .bind(public_key_pem)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to record issued refresh token", e))?;

        self.find_by_user_id(user_id)
            .await?
            .ok_or_else(|| DomainError::StoreUnavailable {
                message: "Key record vanished after upsert".to_string(),
            })
    }

    async fn mark_redeemed_and_rotate(
        &self,
        user_id: Uuid,
        old_digest: &str,
        new_digest: &str,
    ) -> Result<RotationOutcome, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| store_error("Failed to begin rotation transaction", e))?;

        let row = sqlx::query(
            r#"
            SELECT current_refresh_token, redeemed_tokens
            FROM key_records
            WHERE user_id = ?
            FOR UPDATE
            "#,
        )
        .bind(user_id.to_string())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| store_error("Failed to lock key record", e))?;

        let row = match row {
            Some(row) => row,
            None => {
                // Dropping the transaction rolls it back
                return Ok(RotationOutcome::Conflict);
            }
        };

        let current: String = row
            .try_get("current_refresh_token")
            .map_err(|e| decode_error("current_refresh_token", e))?;
        if current != old_digest {
            return Ok(RotationOutcome::Conflict);
        }

        let redeemed_json: String = row
            .try_get("redeemed_tokens")
            .map_err(|e| decode_error("redeemed_tokens", e))?;
        let mut history = decode_history(&redeemed_json)?;
        history.push(current);

        let result = sqlx::query(
            r#"
            UPDATE key_records
            SET current_refresh_token = ?, redeemed_tokens = ?, updated_at = ?
            WHERE user_id = ? AND current_refresh_token = ?
            "#,
        )
        .bind(new_digest)
        .bind(encode_history(&history)?)
        .bind(Utc::now())
        .bind(user_id.to_string())
        .bind(old_digest)
        .execute(&mut *tx)
        .await
        .map_err(|e| store_error("Failed to rotate refresh token", e))?;

        if result.rows_affected() == 0 {
            return Ok(RotationOutcome::Conflict);
        }

        tx.commit()
            .await
            .map_err(|e| store_error("Failed to commit rotation", e))?;

        Ok(RotationOutcome::Rotated)
    }

    async fn contains_redeemed(&self, user_id: Uuid, token_digest: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT redeemed_tokens FROM key_records WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Failed to load redeemed tokens", e))?;

        match row {
            Some(row) => {
                let json: String = row
                    .try_get("redeemed_tokens")
                    .map_err(|e| decode_error("redeemed_tokens", e))?;
                Ok(decode_history(&json)?.contains(token_digest))
            }
            None => Ok(false),
        }
    }

    async fn revoke(&self, user_id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM key_records WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Failed to revoke key record", e))?;

        Ok(result.rows_affected() > 0)
    }
}
