//! Main token service implementation.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::domain::clock::{Clock, SystemClock};
use crate::domain::entities::token::{Claims, RefreshToken, RevocationRecord, TokenPair};
use crate::domain::entities::Principal;
use crate::domain::value_objects::Introspection;
use crate::errors::{DomainError, TokenError};
use crate::repositories::{PrincipalProvider, RefreshTokenRepository, RevocationRepository};

use super::codec::TokenCodec;
use super::config::TokenServiceConfig;
use super::validation::{RevocationValidator, TimestampValidator, ValidationPipeline};

/// Length of the random secret carried by a refresh token
const REFRESH_SECRET_LEN: usize = 64;

/// Orchestrates issuance, introspection, refresh rotation and
/// revocation of tokens.
///
/// The service is stateless across requests: the codec and signing
/// secret are read-only after construction, and every mutation goes
/// through the injected stores. One instance is shared by all workers.
pub struct TokenService<R, B, P>
where
    R: RefreshTokenRepository,
    B: RevocationRepository + 'static,
    P: PrincipalProvider,
{
    refresh_repo: R,
    revocation_repo: Arc<B>,
    principals: P,
    codec: TokenCodec,
    pipeline: ValidationPipeline,
    config: TokenServiceConfig,
    clock: Arc<dyn Clock>,
}

impl<R, B, P> TokenService<R, B, P>
where
    R: RefreshTokenRepository,
    B: RevocationRepository + 'static,
    P: PrincipalProvider,
{
    /// Creates a token service running on the system clock.
    pub fn new(
        refresh_repo: R,
        revocation_repo: Arc<B>,
        principals: P,
        config: TokenServiceConfig,
    ) -> Self {
        Self::with_clock(
            refresh_repo,
            revocation_repo,
            principals,
            config,
            Arc::new(SystemClock),
        )
    }

    /// Creates a token service with an explicit clock.
    pub fn with_clock(
        refresh_repo: R,
        revocation_repo: Arc<B>,
        principals: P,
        config: TokenServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let codec = TokenCodec::new(&config.secret);
        let pipeline = ValidationPipeline::new(codec.clone())
            .with_validator(Box::new(TimestampValidator::new(
                Arc::clone(&clock),
                config.clock_skew_seconds,
            )))
            .with_validator(Box::new(RevocationValidator::new(
                Arc::clone(&revocation_repo),
                config.store_timeout,
            )));

        Self {
            refresh_repo,
            revocation_repo,
            principals,
            codec,
            pipeline,
            config,
            clock,
        }
    }

    /// Issues a fresh access + refresh token pair for a principal.
    ///
    /// Called after the external credential check has succeeded. Side
    /// effect: one refresh token row written.
    pub async fn issue(&self, principal: &Principal) -> Result<TokenPair, DomainError> {
        let now = self.clock.now();
        let claims = Claims::new_access_token(
            principal,
            now,
            Duration::seconds(self.config.access_token_ttl_seconds),
        );
        let access_token = self.codec.encode(&claims)?;
        let refresh_token = self.issue_refresh_token(principal.id, now).await?;

        debug!(subject = principal.id, jti = %claims.jti, "issued token pair");

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_ttl_seconds,
            self.config.refresh_token_ttl_seconds,
        ))
    }

    /// Validates an access token and reports who it belongs to.
    ///
    /// Pure read: runs the validation pipeline and never mutates
    /// state. Any rejection collapses to a generic unauthenticated
    /// outcome; only a store fault surfaces as an error, and that is
    /// fail-closed, never an implicit allow.
    pub async fn introspect(&self, access_token: &str) -> Result<Introspection, DomainError> {
        let claims = match self.pipeline.validate(access_token).await {
            Ok(claims) => claims,
            Err(store_fault @ TokenError::StoreUnavailable { .. }) => {
                return Err(store_fault.into());
            }
            Err(_) => return Ok(Introspection::unauthenticated()),
        };

        match claims.principal() {
            Ok(principal) => Ok(Introspection::authenticated(principal, claims.expires_at())),
            Err(reason) => {
                debug!(reason = reason.code(), jti = %claims.jti, "token rejected");
                Ok(Introspection::unauthenticated())
            }
        }
    }

    /// Rotates a refresh token into a brand-new token pair.
    ///
    /// The old row is consumed atomically before anything is issued:
    /// of N concurrent calls with the same token exactly one wins, the
    /// rest observe `RefreshNotFound`. This bounds a stolen refresh
    /// token to one successful reuse window.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, DomainError> {
        let hash = Self::hash_token(Self::secret_part(refresh_token));

        let row = self
            .with_timeout("consume", self.refresh_repo.consume(&hash))
            .await?
            .ok_or(TokenError::RefreshNotFound)?;

        if row.is_expired(self.clock.now()) {
            debug!(jti = %row.id, "refresh token expired");
            return Err(TokenError::RefreshExpired.into());
        }

        let principal = self
            .with_timeout("find_by_id", self.principals.find_by_id(row.user_id))
            .await?
            // Owner gone: indistinguishable from a consumed token
            .ok_or(TokenError::RefreshNotFound)?;

        debug!(jti = %row.id, subject = row.user_id, "refresh token rotated");

        self.issue(&principal).await
    }

    /// Revokes an access token (logout).
    ///
    /// The token is decoded with its signature verified but its expiry
    /// ignored: an already-expired token still has to decode so its
    /// jti and original expiry can be recorded. Idempotent.
    pub async fn revoke(&self, access_token: &str) -> Result<(), DomainError> {
        let claims = self.codec.decode(access_token)?;
        let record = RevocationRecord::new(claims.jti.clone(), claims.expires_at());

        self.with_timeout("insert", self.revocation_repo.insert(record))
            .await?;

        debug!(jti = %claims.jti, "access token revoked");
        Ok(())
    }

    /// Consumes a refresh token so the session cannot be resurrected
    /// after logout.
    ///
    /// # Returns
    /// * `Ok(true)` - Row consumed
    /// * `Ok(false)` - No such row (already consumed or never issued)
    pub async fn revoke_refresh(&self, refresh_token: &str) -> Result<bool, DomainError> {
        let hash = Self::hash_token(Self::secret_part(refresh_token));

        let consumed = self
            .with_timeout("consume", self.refresh_repo.consume(&hash))
            .await?;

        if let Some(row) = &consumed {
            debug!(jti = %row.id, "refresh token revoked");
        }

        Ok(consumed.is_some())
    }

    /// Generates, stores and returns a new refresh token in its
    /// `jti.secret` wire form.
    async fn issue_refresh_token(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<String, DomainError> {
        let secret = Self::generate_secret();
        let row = RefreshToken::new(
            user_id,
            Self::hash_token(&secret),
            now,
            Duration::seconds(self.config.refresh_token_ttl_seconds),
        );
        let raw = format!("{}.{}", row.id, secret);

        self.with_timeout("save", self.refresh_repo.save(row))
            .await?;

        Ok(raw)
    }

    /// Runs a store operation under the configured deadline.
    ///
    /// A timeout or store error both become `StoreUnavailable`: the
    /// caller fails closed either way.
    async fn with_timeout<T, F>(&self, operation: &'static str, fut: F) -> Result<T, TokenError>
    where
        F: std::future::Future<Output = Result<T, DomainError>>,
    {
        tokio::time::timeout(self.config.store_timeout, fut)
            .await
            .map_err(|_| TokenError::StoreUnavailable { operation })?
            .map_err(|_| TokenError::StoreUnavailable { operation })
    }

    /// Strips the jti prefix off a raw refresh token.
    fn secret_part(refresh_token: &str) -> &str {
        refresh_token
            .split_once('.')
            .map(|(_, secret)| secret)
            .unwrap_or(refresh_token)
    }

    /// Generates the random secret carried by a refresh token.
    fn generate_secret() -> String {
        const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
        let mut rng = rand::thread_rng();
        (0..REFRESH_SECRET_LEN)
            .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
            .collect()
    }

    /// Hashes a refresh secret for storage.
    fn hash_token(secret: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(secret.as_bytes());
        hex::encode(hasher.finalize())
    }
}
