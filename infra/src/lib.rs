//! # Infrastructure Layer
//!
//! Concrete implementations of the repository traits declared in `rk_core`:
//!
//! - **Database**: MySQL implementations using SQLx, with row locking for
//!   refresh token rotation
//! - **Memory**: process-local stores for development and tests
//!
//! Both back ends implement `KeyRecordRepository` and `UserRepository`, so the
//! API selects one at startup from `DatabaseConfig::backend`.

/// Database module - MySQL implementations using SQLx
pub mod database;

/// In-memory store implementations
pub mod memory;

pub use database::{DatabasePool, MySqlKeyRecordRepository, MySqlUserRepository, PoolStatistics};
pub use memory::{InMemoryKeyRecordRepository, InMemoryUserRepository};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
