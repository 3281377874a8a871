//! Unit tests for the bcrypt hasher

use crate::services::password::{BcryptPasswordHasher, PasswordHasher};

fn hasher() -> BcryptPasswordHasher {
    BcryptPasswordHasher::new(4).unwrap()
}

#[tokio::test]
async fn test_hash_then_verify() {
    let hasher = hasher();

    let hash = hasher.hash("P@ssw0rd1").await.unwrap();

    assert_ne!(hash, "P@ssw0rd1");
    assert!(hash.starts_with("$2"));
    assert!(hasher.verify("P@ssw0rd1", &hash).await);
    assert!(!hasher.verify("P@ssw0rd2", &hash).await);
}

#[tokio::test]
async fn test_hashes_are_salted() {
    let hasher = hasher();

    let a = hasher.hash("P@ssw0rd1").await.unwrap();
    let b = hasher.hash("P@ssw0rd1").await.unwrap();

    assert_ne!(a, b);
}

#[tokio::test]
async fn test_malformed_hash_verifies_false() {
    let hasher = hasher();

    assert!(!hasher.verify("P@ssw0rd1", "").await);
    assert!(!hasher.verify("P@ssw0rd1", "not-a-bcrypt-hash").await);
}

#[tokio::test]
async fn test_verify_absent_completes() {
    hasher().verify_absent("anything").await;
}

#[test]
fn test_invalid_cost_rejected() {
    assert!(BcryptPasswordHasher::new(2).is_err());
    assert_eq!(hasher().cost(), 4);
}
