//! Per-request validation pipeline.
//!
//! An inbound token passes through an ordered chain of independent
//! checks: structure+signature (the codec), then timestamps, then the
//! revocation list. The chain short-circuits on the first failure and
//! the triggering reason is logged, never handed back to the caller
//! in detail.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::clock::Clock;
use crate::domain::entities::token::Claims;
use crate::errors::TokenError;
use crate::repositories::RevocationRepository;

use super::codec::TokenCodec;

/// One check in the validation chain.
///
/// Validators are independent so checks can be added or removed
/// without touching call sites (e.g. a future device-binding check
/// slots in beside these).
#[async_trait]
pub trait ClaimsValidator: Send + Sync {
    /// Short name used when logging a rejection.
    fn name(&self) -> &'static str;

    /// Passes silently or fails with the reason for rejection.
    async fn validate(&self, claims: &Claims) -> Result<(), TokenError>;
}

/// Rejects tokens outside their `[iat - skew, exp)` validity window.
///
/// The skew absorbs clock drift between issuer and verifier on the
/// issued-at side only; expiry is strict.
pub struct TimestampValidator {
    clock: Arc<dyn Clock>,
    skew_seconds: i64,
}

impl TimestampValidator {
    pub fn new(clock: Arc<dyn Clock>, skew_seconds: i64) -> Self {
        Self {
            clock,
            skew_seconds,
        }
    }
}

#[async_trait]
impl ClaimsValidator for TimestampValidator {
    fn name(&self) -> &'static str {
        "timestamp"
    }

    async fn validate(&self, claims: &Claims) -> Result<(), TokenError> {
        let now = self.clock.now();

        if now.timestamp() < claims.iat - self.skew_seconds {
            return Err(TokenError::NotYetValid);
        }
        if claims.is_expired(now) {
            return Err(TokenError::Expired);
        }

        Ok(())
    }
}

/// Rejects tokens whose jti is on the revocation list.
///
/// The store lookup runs under a bounded deadline; a timed-out or
/// failed lookup rejects the token (fail-closed), it never counts as
/// an implicit allow.
pub struct RevocationValidator<B: RevocationRepository> {
    repository: Arc<B>,
    timeout: Duration,
}

impl<B: RevocationRepository> RevocationValidator<B> {
    pub fn new(repository: Arc<B>, timeout: Duration) -> Self {
        Self {
            repository,
            timeout,
        }
    }
}

#[async_trait]
impl<B: RevocationRepository> ClaimsValidator for RevocationValidator<B> {
    fn name(&self) -> &'static str {
        "revocation"
    }

    async fn validate(&self, claims: &Claims) -> Result<(), TokenError> {
        let revoked = tokio::time::timeout(self.timeout, self.repository.is_revoked(&claims.jti))
            .await
            .map_err(|_| TokenError::StoreUnavailable {
                operation: "is_revoked",
            })?
            .map_err(|_| TokenError::StoreUnavailable {
                operation: "is_revoked",
            })?;

        if revoked {
            return Err(TokenError::Revoked);
        }

        Ok(())
    }
}

/// Ordered chain of checks applied to every inbound access token.
pub struct ValidationPipeline {
    codec: TokenCodec,
    validators: Vec<Box<dyn ClaimsValidator>>,
}

impl ValidationPipeline {
    /// Creates a pipeline with only the structural/signature stage.
    pub fn new(codec: TokenCodec) -> Self {
        Self {
            codec,
            validators: Vec::new(),
        }
    }

    /// Appends a validator to the chain.
    pub fn with_validator(mut self, validator: Box<dyn ClaimsValidator>) -> Self {
        self.validators.push(validator);
        self
    }

    /// Runs the full chain, short-circuiting on the first failure.
    pub async fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = self.codec.decode(token).map_err(|reason| {
            debug!(validator = "signature", reason = reason.code(), "token rejected");
            reason
        })?;

        for validator in &self.validators {
            if let Err(reason) = validator.validate(&claims).await {
                debug!(
                    validator = validator.name(),
                    reason = reason.code(),
                    jti = %claims.jti,
                    "token rejected"
                );
                return Err(reason);
            }
        }

        Ok(claims)
    }
}
