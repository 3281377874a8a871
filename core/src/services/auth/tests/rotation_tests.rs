//! Refresh rotation and reuse detection

use std::collections::HashSet;

use crate::domain::entities::key_record::REDEEMED_TOKENS_CAPACITY;
use crate::domain::entities::token::fingerprint;
use crate::errors::{AuthError, DomainError};
use crate::repositories::KeyRecordRepository;

use super::mocks::{TestContext, ALICE_EMAIL, ALICE_PASSWORD};

fn is_suspicious<T: std::fmt::Debug>(result: &Result<T, DomainError>) -> bool {
    matches!(result, Err(DomainError::Auth(AuthError::SuspiciousActivity)))
}

#[tokio::test]
async fn test_refresh_rotates_pair() {
    let (ctx, alice) = TestContext::new().with_alice().await;
    let first = ctx.service.login(ALICE_EMAIL, ALICE_PASSWORD).await.unwrap();

    let second = ctx.service.refresh(&first.refresh_token).await.unwrap();

    assert_ne!(second.refresh_token, first.refresh_token);
    assert_ne!(second.access_token, first.access_token);
    assert_eq!(second.role, first.role);

    let record = ctx.key_records.find_by_user_id(alice.id).await.unwrap().unwrap();
    assert!(record.is_current(&fingerprint(&second.refresh_token)));
    assert!(record.has_redeemed(&fingerprint(&first.refresh_token)));
    assert!(!record.has_redeemed(&record.current_refresh_token));
}

#[tokio::test]
async fn test_replay_revokes_whole_session() {
    let (ctx, alice) = TestContext::new().with_alice().await;

    // login -> (A0, R0)
    let r0 = ctx.service.login(ALICE_EMAIL, ALICE_PASSWORD).await.unwrap().refresh_token;
    // refresh(R0) -> (A1, R1)
    let r1 = ctx.service.refresh(&r0).await.unwrap().refresh_token;
    // refresh(R0) again -> replay
    let replay = ctx.service.refresh(&r0).await;
    assert!(is_suspicious(&replay));
    assert!(ctx.key_records.find_by_user_id(alice.id).await.unwrap().is_none());

    // the legitimate successor died with the session
    let err = ctx.service.refresh(&r1).await.unwrap_err();
    assert!(err.is_invalid_token());
}

#[tokio::test]
async fn test_history_keeps_last_ten_redemptions() {
    let (ctx, alice) = TestContext::new().with_alice().await;
    let mut issued = vec![ctx.service.login(ALICE_EMAIL, ALICE_PASSWORD).await.unwrap().refresh_token];

    for _ in 0..11 {
        let current = issued.last().unwrap().clone();
        issued.push(ctx.service.refresh(&current).await.unwrap().refresh_token);
    }

    let record = ctx.key_records.find_by_user_id(alice.id).await.unwrap().unwrap();
    assert_eq!(record.redeemed_tokens.len(), REDEEMED_TOKENS_CAPACITY);
    assert!(!record.has_redeemed(&fingerprint(&issued[0])));
    for token in &issued[1..11] {
        assert!(record.has_redeemed(&fingerprint(token)));
    }
    assert!(record.is_current(&fingerprint(&issued[11])));
}

#[tokio::test]
async fn test_evicted_token_still_cannot_rotate() {
    let (ctx, alice) = TestContext::new().with_alice().await;
    let mut issued = vec![ctx.service.login(ALICE_EMAIL, ALICE_PASSWORD).await.unwrap().refresh_token];
    for _ in 0..11 {
        let current = issued.last().unwrap().clone();
        issued.push(ctx.service.refresh(&current).await.unwrap().refresh_token);
    }

    let lookups = ctx.key_records.lookup_count();
    let result = ctx.service.refresh(&issued[0]).await;

    assert!(is_suspicious(&result));
    // one read before the compare-and-swap, none after losing it
    assert_eq!(ctx.key_records.lookup_count() - lookups, 1);
    // evicted tokens lose the compare-and-swap but no longer trigger revocation
    assert!(ctx.key_records.find_by_user_id(alice.id).await.unwrap().is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_refresh_has_single_winner() {
    let (ctx, _alice) = TestContext::new().with_alice().await;
    let r0 = ctx.service.login(ALICE_EMAIL, ALICE_PASSWORD).await.unwrap().refresh_token;

    let a = {
        let service = ctx.service.clone();
        let token = r0.clone();
        tokio::spawn(async move { service.refresh(&token).await })
    };
    let b = {
        let service = ctx.service.clone();
        let token = r0.clone();
        tokio::spawn(async move { service.refresh(&token).await })
    };

    let results = [a.await.unwrap(), b.await.unwrap()];

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(results.iter().filter(|r| is_suspicious(r)).count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_many_concurrent_refreshes_have_single_winner() {
    let (ctx, _alice) = TestContext::new().with_alice().await;
    let r0 = ctx.service.login(ALICE_EMAIL, ALICE_PASSWORD).await.unwrap().refresh_token;

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let service = ctx.service.clone();
            let token = r0.clone();
            tokio::spawn(async move { service.refresh(&token).await })
        })
        .collect();

    let mut winners = HashSet::new();
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(response) => {
                winners.insert(response.refresh_token);
            }
            // late arrivals may find the session already revoked by a replay detection
            Err(err) if err.is_suspicious_activity() || err.is_invalid_token() => rejected += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(winners.len(), 1);
    assert_eq!(rejected, 15);
}
