//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management and schema migrations
//! - Repository implementations for identities and key records

pub mod connection;
pub mod mysql;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlKeyRecordRepository, MySqlUserRepository};

use rk_core::errors::DomainError;

/// Maps a driver error to the domain's store failure
pub(crate) fn store_error(context: &str, error: sqlx::Error) -> DomainError {
    tracing::error!(error = %error, "{}", context);
    DomainError::StoreUnavailable {
        message: format!("{}: {}", context, error),
    }
}

/// Maps a row decoding problem to an internal error
pub(crate) fn decode_error(column: &str, error: impl std::fmt::Display) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to decode {}: {}", column, error),
    }
}
