//! Refresh token repository trait defining the interface for refresh
//! token persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository contract for `RefreshToken` rows.
///
/// Tokens are addressed by the SHA-256 hash of their secret; the raw
/// secret never reaches storage. `consume` is the single correctness-
/// critical primitive: it must remove-and-return atomically so that
/// concurrent rotations of the same token have exactly one winner.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Persist a new refresh token row.
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The saved row
    /// * `Err(DomainError)` - Save failed (e.g. duplicate hash)
    async fn save(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Look up a refresh token row by its hashed secret.
    ///
    /// # Returns
    /// * `Ok(Some(RefreshToken))` - Row found
    /// * `Ok(None)` - No row with the given hash
    /// * `Err(DomainError)` - Store error
    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Atomically remove the row with the given hash and return it.
    ///
    /// When several callers race on the same hash, exactly one gets
    /// `Ok(Some(..))`; the rest get `Ok(None)`. This is what makes
    /// refresh tokens single-use.
    async fn consume(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Delete every row whose expiry is at or before `now`.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of rows deleted
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;
}
