//! Revocation repository trait defining the interface for the
//! server-side revocation list.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::token::RevocationRecord;
use crate::errors::DomainError;

/// Repository contract for `RevocationRecord` rows.
///
/// The list is the authority on "has this access token been killed
/// before its natural expiry". Records only need to live as long as
/// the token they kill, so the reaper deletes them past expiry.
#[async_trait]
pub trait RevocationRepository: Send + Sync {
    /// Insert a revocation record.
    ///
    /// Idempotent: inserting an already-present jti is a no-op
    /// success, so revoking twice never fails.
    async fn insert(&self, record: RevocationRecord) -> Result<(), DomainError>;

    /// Check whether the given jti is on the revocation list.
    async fn is_revoked(&self, jti: &str) -> Result<bool, DomainError>;

    /// Delete every record whose expiry is at or before `now`.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records deleted
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;
}
