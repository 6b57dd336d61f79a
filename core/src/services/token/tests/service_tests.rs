//! Unit tests for the token service.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::Duration;

use crate::domain::clock::ManualClock;
use crate::domain::entities::token::RevocationRecord;
use crate::domain::entities::Principal;
use crate::errors::{DomainError, TokenError};
use crate::repositories::{
    MockPrincipalProvider, MockRefreshTokenRepository, MockRevocationRepository,
    RevocationRepository,
};
use crate::services::token::{TokenService, TokenServiceConfig};

fn alice() -> Principal {
    Principal::new(7, "alice", vec!["USER".to_string()])
}

struct Harness {
    service: TokenService<MockRefreshTokenRepository, MockRevocationRepository, MockPrincipalProvider>,
    clock: Arc<ManualClock>,
    revocations: Arc<MockRevocationRepository>,
    principals: MockPrincipalProvider,
}

fn harness_with_config(config: TokenServiceConfig) -> Harness {
    let clock = Arc::new(ManualClock::from_system());
    let revocations = Arc::new(MockRevocationRepository::new());
    let principals = MockPrincipalProvider::with_principals(vec![alice()]);

    let service = TokenService::with_clock(
        MockRefreshTokenRepository::new(),
        Arc::clone(&revocations),
        principals.clone(),
        config,
        clock.clone(),
    );

    Harness {
        service,
        clock,
        revocations,
        principals,
    }
}

fn harness() -> Harness {
    harness_with_config(TokenServiceConfig {
        secret: "test-secret".to_string(),
        ..TokenServiceConfig::default()
    })
}

#[tokio::test]
async fn test_issue_then_introspect_returns_principal() {
    let h = harness();

    let pair = h.service.issue(&alice()).await.unwrap();
    let outcome = h.service.introspect(&pair.access_token).await.unwrap();

    assert!(outcome.authenticated);
    let principal = outcome.principal.unwrap();
    assert_eq!(principal.id, 7);
    assert_eq!(principal.username, "alice");
    assert!(principal.has_scope("USER"));
    assert!(outcome.expires_at.is_some());
}

#[tokio::test]
async fn test_introspect_after_expiry_is_unauthenticated() {
    let h = harness();
    let pair = h.service.issue(&alice()).await.unwrap();

    h.clock.advance(Duration::seconds(899));
    assert!(h.service.introspect(&pair.access_token).await.unwrap().authenticated);

    h.clock.advance(Duration::seconds(1));
    assert!(!h.service.introspect(&pair.access_token).await.unwrap().authenticated);
}

#[tokio::test]
async fn test_introspect_after_revoke_is_unauthenticated() {
    let h = harness();
    let pair = h.service.issue(&alice()).await.unwrap();

    h.service.revoke(&pair.access_token).await.unwrap();

    // Still well inside the expiry window
    let outcome = h.service.introspect(&pair.access_token).await.unwrap();
    assert!(!outcome.authenticated);
    assert!(outcome.principal.is_none());
}

#[tokio::test]
async fn test_revoke_is_idempotent() {
    let h = harness();
    let pair = h.service.issue(&alice()).await.unwrap();

    h.service.revoke(&pair.access_token).await.unwrap();
    h.service.revoke(&pair.access_token).await.unwrap();

    assert_eq!(h.revocations.len().await, 1);
}

#[tokio::test]
async fn test_revoke_decodes_expired_tokens() {
    let h = harness();
    let pair = h.service.issue(&alice()).await.unwrap();

    h.clock.advance(Duration::seconds(3600));

    // Expired tokens must still revoke cleanly on logout
    assert!(h.service.revoke(&pair.access_token).await.is_ok());
}

#[tokio::test]
async fn test_revoke_rejects_forged_tokens() {
    let h = harness();

    let result = h.service.revoke("not-a-token").await;

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::Malformed))
    ));
}

#[tokio::test]
async fn test_tampered_signature_is_unauthenticated() {
    let h = harness();
    let pair = h.service.issue(&alice()).await.unwrap();

    let sig_start = pair.access_token.rfind('.').unwrap() + 1;
    let mut bytes = pair.access_token.into_bytes();
    bytes[sig_start] = if bytes[sig_start] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(bytes).unwrap();

    let outcome = h.service.introspect(&tampered).await.unwrap();
    assert!(!outcome.authenticated);
}

#[tokio::test]
async fn test_refresh_is_single_use() {
    let h = harness();
    let pair = h.service.issue(&alice()).await.unwrap();

    let rotated = h.service.refresh(&pair.refresh_token).await.unwrap();
    assert_ne!(rotated.refresh_token, pair.refresh_token);

    let replay = h.service.refresh(&pair.refresh_token).await;
    assert!(matches!(
        replay,
        Err(DomainError::Token(TokenError::RefreshNotFound))
    ));
}

#[tokio::test]
async fn test_refresh_past_its_expiry() {
    let h = harness_with_config(TokenServiceConfig {
        secret: "test-secret".to_string(),
        refresh_token_ttl_seconds: 3600,
        ..TokenServiceConfig::default()
    });
    let pair = h.service.issue(&alice()).await.unwrap();

    h.clock.advance(Duration::seconds(3601));

    let result = h.service.refresh(&pair.refresh_token).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::RefreshExpired))
    ));
}

#[tokio::test]
async fn test_refresh_with_unknown_token() {
    let h = harness();

    let result = h.service.refresh("ffffffff-0000-0000-0000-000000000000.bogus").await;

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::RefreshNotFound))
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_refresh_has_exactly_one_winner() {
    let h = harness();
    let pair = h.service.issue(&alice()).await.unwrap();

    let service = Arc::new(h.service);
    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = Arc::clone(&service);
        let token = pair.refresh_token.clone();
        handles.push(tokio::spawn(async move { service.refresh(&token).await }));
    }

    let mut winners = 0;
    let mut not_found = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => winners += 1,
            Err(DomainError::Token(TokenError::RefreshNotFound)) => not_found += 1,
            Err(other) => panic!("unexpected refresh outcome: {other}"),
        }
    }

    assert_eq!(winners, 1);
    assert_eq!(not_found, 7);
}

#[tokio::test]
async fn test_revoke_refresh_kills_later_rotation() {
    let h = harness();
    let pair = h.service.issue(&alice()).await.unwrap();

    assert!(h.service.revoke_refresh(&pair.refresh_token).await.unwrap());
    // Second revoke finds nothing, still a success
    assert!(!h.service.revoke_refresh(&pair.refresh_token).await.unwrap());

    let result = h.service.refresh(&pair.refresh_token).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::RefreshNotFound))
    ));
}

#[tokio::test]
async fn test_store_fault_fails_closed() {
    let h = harness();
    let pair = h.service.issue(&alice()).await.unwrap();

    h.revocations.set_failing(true);

    let result = h.service.introspect(&pair.access_token).await;
    match result {
        Err(err) => assert!(err.is_retryable()),
        Ok(outcome) => panic!("store fault must not validate a token: {outcome:?}"),
    }
}

/// Revocation store whose lookups never complete.
struct HangingRevocationRepository;

#[async_trait]
impl RevocationRepository for HangingRevocationRepository {
    async fn insert(&self, _record: RevocationRecord) -> Result<(), DomainError> {
        Ok(())
    }

    async fn is_revoked(&self, _jti: &str) -> Result<bool, DomainError> {
        std::future::pending::<()>().await;
        unreachable!()
    }

    async fn delete_expired(
        &self,
        _now: chrono::DateTime<chrono::Utc>,
    ) -> Result<usize, DomainError> {
        Ok(0)
    }
}

#[tokio::test(start_paused = true)]
async fn test_store_timeout_fails_closed() {
    let config = TokenServiceConfig {
        secret: "test-secret".to_string(),
        store_timeout: StdDuration::from_millis(50),
        ..TokenServiceConfig::default()
    };
    let service = TokenService::new(
        MockRefreshTokenRepository::new(),
        Arc::new(HangingRevocationRepository),
        MockPrincipalProvider::with_principals(vec![alice()]),
        config,
    );

    let pair = service.issue(&alice()).await.unwrap();
    let result = service.introspect(&pair.access_token).await;

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::StoreUnavailable { .. }))
    ));
}

#[tokio::test]
async fn test_refresh_after_owner_deleted() {
    let h = harness();
    let pair = h.service.issue(&alice()).await.unwrap();

    h.principals.remove(7).await;

    let result = h.service.refresh(&pair.refresh_token).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::RefreshNotFound))
    ));
}

#[tokio::test]
async fn test_lifecycle_scenario() {
    // issue access-ttl=900s, refresh-ttl=1209600s for {id=7, ["USER"]}
    let h = harness_with_config(TokenServiceConfig {
        secret: "test-secret".to_string(),
        access_token_ttl_seconds: 900,
        refresh_token_ttl_seconds: 1_209_600,
        ..TokenServiceConfig::default()
    });

    let pair = h.service.issue(&alice()).await.unwrap();

    // Immediately authenticated as principal 7
    let outcome = h.service.introspect(&pair.access_token).await.unwrap();
    assert!(outcome.authenticated);
    assert_eq!(outcome.principal.unwrap().id, 7);

    // 901s later the access token is dead...
    h.clock.advance(Duration::seconds(901));
    assert!(!h.service.introspect(&pair.access_token).await.unwrap().authenticated);

    // ...but the refresh token is well within its ttl and rotates
    let rotated = h.service.refresh(&pair.refresh_token).await.unwrap();
    let outcome = h.service.introspect(&rotated.access_token).await.unwrap();
    assert!(outcome.authenticated);
    assert_eq!(outcome.principal.unwrap().id, 7);
}
