use actix_web::{web, HttpResponse};
use rk_core::repositories::{KeyRecordRepository, UserRepository};
use rk_core::PasswordHasher;
use rk_infra::DatabasePool;

use super::AppState;

/// Handle on the backing store for health reporting
#[derive(Clone)]
pub enum StoreProbe {
    Memory,
    MySql(DatabasePool),
}

impl StoreProbe {
    pub fn name(&self) -> &'static str {
        match self {
            StoreProbe::Memory => "memory",
            StoreProbe::MySql(_) => "mysql",
        }
    }

    /// The in-memory store is always reachable
    pub async fn is_healthy(&self) -> bool {
        match self {
            StoreProbe::Memory => true,
            StoreProbe::MySql(pool) => matches!(pool.health_check().await, Ok(true)),
        }
    }
}

/// Handler for GET /health
///
/// ## Success (200 OK)
/// ```json
/// {
///     "status": "healthy",
///     "store": "mysql",
///     "version": "0.1.0",
///     "timestamp": "2024-06-01T10:00:00+00:00"
/// }
/// ```
///
/// Answers 503 with `"status": "unhealthy"` when the store is unreachable.
pub async fn health_check<U, K, P>(state: web::Data<AppState<U, K, P>>) -> HttpResponse
where
    U: UserRepository + 'static,
    K: KeyRecordRepository + 'static,
    P: PasswordHasher + 'static,
{
    let healthy = state.store.is_healthy().await;

    let body = serde_json::json!({
        "status": if healthy { "healthy" } else { "unhealthy" },
        "store": state.store.name(),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        tracing::warn!(store = state.store.name(), "Health check failed");
        HttpResponse::ServiceUnavailable().json(body)
    }
}
