//! User repository trait defining the interface for identity lookups.
//!
//! The identity directory is owned outside the token lifecycle; the core only
//! needs to read identities and store password hashes.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::{normalize_email, User};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use uuid::Uuid;
/// use rk_core::repositories::UserRepository;
/// use rk_core::domain::entities::user::User;
/// use rk_core::errors::DomainError;
///
/// struct StaticUserRepository;
///
/// #[async_trait]
/// impl UserRepository for StaticUserRepository {
///     async fn find_by_id(&self, _id: Uuid) -> Result<Option<User>, DomainError> {
///         Ok(None)
///     }
///
///     async fn find_by_email(&self, _email: &str) -> Result<Option<User>, DomainError> {
///         Ok(None)
///     }
///
///     async fn create(&self, user: User) -> Result<User, DomainError> {
///         Ok(user)
///     }
///
///     async fn store_password_hash(&self, _id: Uuid, _hash: &str) -> Result<(), DomainError> {
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with given ID
    /// * `Err(DomainError)` - Store error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by email; implementations compare the normalized form
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Resolve a login identifier that is either a user id or an email
    async fn find_by_id_or_email(&self, key: &str) -> Result<Option<User>, DomainError> {
        match Uuid::parse_str(key.trim()) {
            Ok(id) => self.find_by_id(id).await,
            Err(_) => self.find_by_email(&normalize_email(key)).await,
        }
    }

    /// Create a new user
    ///
    /// # Returns
    /// * `Ok(User)` - Created user
    /// * `Err(DomainError::Auth(AuthError::UserAlreadyExists))` - Email taken
    /// * `Err(DomainError)` - Store error occurred
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Replace the password hash of an existing user
    ///
    /// # Returns
    /// * `Ok(())` - Hash stored
    /// * `Err(DomainError::Auth(AuthError::UserNotFound))` - No such user
    async fn store_password_hash(&self, id: Uuid, password_hash: &str) -> Result<(), DomainError>;
}
