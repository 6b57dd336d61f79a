//! Unit tests for the mock revocation list.

use chrono::{Duration, Utc};

use crate::domain::entities::token::RevocationRecord;
use crate::repositories::revocation::{MockRevocationRepository, RevocationRepository};

#[tokio::test]
async fn test_insert_and_membership() {
    let repo = MockRevocationRepository::new();
    let record = RevocationRecord::new("jti-1", Utc::now() + Duration::seconds(900));

    repo.insert(record).await.unwrap();

    assert!(repo.is_revoked("jti-1").await.unwrap());
    assert!(!repo.is_revoked("jti-2").await.unwrap());
}

#[tokio::test]
async fn test_insert_is_idempotent() {
    let repo = MockRevocationRepository::new();
    let expiry = Utc::now() + Duration::seconds(900);

    repo.insert(RevocationRecord::new("jti-1", expiry)).await.unwrap();
    repo.insert(RevocationRecord::new("jti-1", expiry)).await.unwrap();

    assert_eq!(repo.len().await, 1);
    assert!(repo.is_revoked("jti-1").await.unwrap());
}

#[tokio::test]
async fn test_delete_expired_reaps_only_past_records() {
    let repo = MockRevocationRepository::new();
    let now = Utc::now();

    repo.insert(RevocationRecord::new("dead", now - Duration::seconds(1)))
        .await
        .unwrap();
    repo.insert(RevocationRecord::new("live", now + Duration::seconds(900)))
        .await
        .unwrap();

    let deleted = repo.delete_expired(now).await.unwrap();

    assert_eq!(deleted, 1);
    assert!(!repo.is_revoked("dead").await.unwrap());
    assert!(repo.is_revoked("live").await.unwrap());
}

#[tokio::test]
async fn test_failing_mode_returns_errors() {
    let repo = MockRevocationRepository::new();
    repo.set_failing(true);

    assert!(repo.is_revoked("jti-1").await.is_err());
}
