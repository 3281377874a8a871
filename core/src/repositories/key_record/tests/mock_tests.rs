//! Unit tests for mock key record repository implementation

use uuid::Uuid;

use crate::domain::entities::key_record::RotationOutcome;
use crate::repositories::key_record::{KeyRecordRepository, MockKeyRecordRepository};

#[tokio::test]
async fn test_record_issued_upserts() {
    let repo = MockKeyRecordRepository::new();
    let user_id = Uuid::new_v4();

    let first = repo.record_issued(user_id, "r0", None).await.unwrap();
    assert_eq!(first.current_refresh_token, "r0");

    repo.mark_redeemed_and_rotate(user_id, "r0", "r1").await.unwrap();
    let second = repo.record_issued(user_id, "r2", None).await.unwrap();

    assert_eq!(second.current_refresh_token, "r2");
    assert!(second.has_redeemed("r0"));
    assert_eq!(second.created_at, first.created_at);
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_rotate_missing_record_conflicts() {
    let repo = MockKeyRecordRepository::new();

    let outcome = repo
        .mark_redeemed_and_rotate(Uuid::new_v4(), "r0", "r1")
        .await
        .unwrap();

    assert_eq!(outcome, RotationOutcome::Conflict);
    assert_eq!(repo.len().await, 0);
}

#[tokio::test]
async fn test_contains_redeemed_default_impl() {
    let repo = MockKeyRecordRepository::new();
    let user_id = Uuid::new_v4();
    repo.record_issued(user_id, "r0", None).await.unwrap();
    repo.mark_redeemed_and_rotate(user_id, "r0", "r1").await.unwrap();

    assert!(repo.contains_redeemed(user_id, "r0").await.unwrap());
    assert!(!repo.contains_redeemed(user_id, "r1").await.unwrap());
    assert!(!repo.contains_redeemed(Uuid::new_v4(), "r0").await.unwrap());
}

#[tokio::test]
async fn test_revoke_reports_existence() {
    let repo = MockKeyRecordRepository::new();
    let user_id = Uuid::new_v4();
    repo.record_issued(user_id, "r0", None).await.unwrap();

    assert!(repo.revoke(user_id).await.unwrap());
    assert!(!repo.revoke(user_id).await.unwrap());
    assert!(repo.find_by_user_id(user_id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_unavailable_store_errors() {
    let repo = MockKeyRecordRepository::new();
    repo.set_unavailable(true);

    let err = repo.find_by_user_id(Uuid::new_v4()).await.unwrap_err();

    assert!(matches!(err, crate::errors::DomainError::StoreUnavailable { .. }));
}
