//! In-memory identity directory

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use rk_core::domain::entities::user::{normalize_email, User};
use rk_core::errors::{AuthError, DomainError};
use rk_core::repositories::UserRepository;

/// Users keyed by id, with an email index
#[derive(Default)]
pub struct InMemoryUserRepository {
    inner: RwLock<Directory>,
}

#[derive(Default)]
struct Directory {
    users: HashMap<Uuid, User>,
    by_email: HashMap<String, Uuid>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes a user, returning whether one existed
    pub async fn delete(&self, id: Uuid) -> bool {
        let mut directory = self.inner.write().await;
        match directory.users.remove(&id) {
            Some(user) => {
                directory.by_email.remove(&user.email);
                true
            }
            None => false,
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.users.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let directory = self.inner.read().await;
        Ok(directory
            .by_email
            .get(&normalize_email(email))
            .and_then(|id| directory.users.get(id))
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut directory = self.inner.write().await;
        if directory.by_email.contains_key(&user.email) || directory.users.contains_key(&user.id) {
            return Err(DomainError::Auth(AuthError::UserAlreadyExists));
        }

        directory.by_email.insert(user.email.clone(), user.id);
        directory.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn store_password_hash(&self, id: Uuid, password_hash: &str) -> Result<(), DomainError> {
        let mut directory = self.inner.write().await;
        let user = directory
            .users
            .get_mut(&id)
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;
        user.set_password_hash(password_hash.to_string());
        Ok(())
    }
}
