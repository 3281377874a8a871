//! MySQL implementation of UserRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use rk_core::domain::entities::user::{normalize_email, Role, User};
use rk_core::errors::{AuthError, DomainError};
use rk_core::repositories::UserRepository;

use crate::database::{decode_error, store_error};

/// MySQL implementation of the identity directory
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a User entity
    fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(|e| decode_error("id", e))?;
        let role: String = row.try_get("role").map_err(|e| decode_error("role", e))?;
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| decode_error("created_at", e))?;
        let updated_at: DateTime<Utc> = row
            .try_get("updated_at")
            .map_err(|e| decode_error("updated_at", e))?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| decode_error("id", e))?,
            email: row.try_get("email").map_err(|e| decode_error("email", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| decode_error("password_hash", e))?,
            role: role.parse::<Role>().map_err(|e| decode_error("role", e))?,
            created_at,
            updated_at,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, role, created_at, updated_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("Failed to find user by id", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, role, created_at, updated_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("Failed to find user by email", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, role, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(DomainError::Auth(AuthError::UserAlreadyExists))
            }
            Err(e) => Err(store_error("Failed to create user", e)),
        }
    }

    async fn store_password_hash(&self, id: Uuid, password_hash: &str) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(password_hash)
        .bind(Utc::now())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to store password hash", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::Auth(AuthError::UserNotFound));
        }

        Ok(())
    }
}
