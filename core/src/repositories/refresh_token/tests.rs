//! Unit tests for the mock refresh token store.

use chrono::{Duration, Utc};

use crate::domain::entities::token::RefreshToken;
use crate::repositories::refresh_token::{MockRefreshTokenRepository, RefreshTokenRepository};

fn token(user_id: i64, hash: &str, ttl_days: i64) -> RefreshToken {
    RefreshToken::new(user_id, hash.to_string(), Utc::now(), Duration::days(ttl_days))
}

#[tokio::test]
async fn test_save_and_find() {
    let repo = MockRefreshTokenRepository::new();
    let saved = repo.save(token(7, "hash-a", 7)).await.unwrap();

    let found = repo.find_by_hash("hash-a").await.unwrap().unwrap();
    assert_eq!(found, saved);
    assert!(repo.find_by_hash("hash-b").await.unwrap().is_none());
}

#[tokio::test]
async fn test_save_rejects_duplicate_hash() {
    let repo = MockRefreshTokenRepository::new();
    repo.save(token(7, "hash-a", 7)).await.unwrap();

    let result = repo.save(token(8, "hash-a", 7)).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_consume_is_single_use() {
    let repo = MockRefreshTokenRepository::new();
    repo.save(token(7, "hash-a", 7)).await.unwrap();

    let first = repo.consume("hash-a").await.unwrap();
    let second = repo.consume("hash-a").await.unwrap();

    assert!(first.is_some());
    assert!(second.is_none());
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_concurrent_consume_has_one_winner() {
    use std::sync::Arc;

    let repo = Arc::new(MockRefreshTokenRepository::new());
    repo.save(token(7, "hash-a", 7)).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let repo = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            repo.consume("hash-a").await.unwrap().is_some()
        }));
    }

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }

    assert_eq!(winners, 1);
}

#[tokio::test]
async fn test_delete_expired_keeps_live_rows() {
    let repo = MockRefreshTokenRepository::new();
    let now = Utc::now();

    let mut expired = token(7, "hash-old", 7);
    expired.expires_at = now - Duration::days(1);
    repo.save(expired).await.unwrap();
    repo.save(token(7, "hash-live", 7)).await.unwrap();

    let deleted = repo.delete_expired(now).await.unwrap();

    assert_eq!(deleted, 1);
    assert_eq!(repo.len().await, 1);
    assert!(repo.find_by_hash("hash-live").await.unwrap().is_some());
}
