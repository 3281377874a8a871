//! Route handlers
//!
//! - `users` - signup, login, token refresh, logout, profile, password change
//! - `health` - store health check

pub mod health;
pub mod users;

use std::sync::Arc;

use rk_core::repositories::{KeyRecordRepository, UserRepository};
use rk_core::{AuthService, BcryptPasswordHasher, PasswordHasher};

pub use health::StoreProbe;

/// Application state that holds shared services
pub struct AppState<U, K, P = BcryptPasswordHasher>
where
    U: UserRepository,
    K: KeyRecordRepository,
    P: PasswordHasher,
{
    pub auth_service: Arc<AuthService<U, K, P>>,
    pub store: StoreProbe,
}

impl<U, K, P> AppState<U, K, P>
where
    U: UserRepository,
    K: KeyRecordRepository,
    P: PasswordHasher,
{
    pub fn new(auth_service: Arc<AuthService<U, K, P>>, store: StoreProbe) -> Self {
        Self {
            auth_service,
            store,
        }
    }
}
