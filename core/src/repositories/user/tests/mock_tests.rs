//! Unit tests for mock user repository implementation

use uuid::Uuid;

use crate::domain::entities::user::{Role, User};
use crate::errors::{AuthError, DomainError};
use crate::repositories::user::{MockUserRepository, UserRepository};

#[tokio::test]
async fn test_find_by_id_or_email_accepts_both_forms() {
    let repo = MockUserRepository::new();
    let user = User::new("alice@example.com", "hash".to_string(), Role::Customer);
    repo.insert(user.clone()).await;

    let by_email = repo.find_by_id_or_email("Alice@Example.com").await.unwrap();
    let by_id = repo.find_by_id_or_email(&user.id.to_string()).await.unwrap();

    assert_eq!(by_email.map(|u| u.id), Some(user.id));
    assert_eq!(by_id.map(|u| u.id), Some(user.id));
    assert!(repo.find_by_id_or_email("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_rejects_duplicate_email() {
    let repo = MockUserRepository::new();
    repo.create(User::new("bob@example.com", "h".to_string(), Role::Admin))
        .await
        .unwrap();

    let result = repo
        .create(User::new("BOB@example.com", "h".to_string(), Role::Customer))
        .await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserAlreadyExists))
    ));
}

#[tokio::test]
async fn test_store_password_hash() {
    let repo = MockUserRepository::new();
    let user = repo
        .create(User::new("carol@example.com", "old".to_string(), Role::ShopOwner))
        .await
        .unwrap();

    repo.store_password_hash(user.id, "new").await.unwrap();

    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.password_hash, "new");
    assert!(matches!(
        repo.store_password_hash(Uuid::new_v4(), "x").await,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}
