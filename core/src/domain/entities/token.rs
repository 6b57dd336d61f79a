//! Token entities: signed claims, stored refresh tokens and the
//! revocation list records.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::principal::Principal;
use crate::errors::TokenError;

/// JWT issuer claim
pub const JWT_ISSUER: &str = "tourpass";

/// Claims structure for the access token payload.
///
/// An access token is never persisted; the signed compact string the
/// caller holds is its only representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (principal id)
    pub sub: String,

    /// Display username snapshot
    pub username: String,

    /// Scope strings snapshot
    pub scope: Vec<String>,

    /// Issuer
    pub iss: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Unique token identifier, the revocation key
    pub jti: String,
}

impl Claims {
    /// Creates claims for a new access token.
    ///
    /// Stamps `iat = now`, `exp = now + ttl` and a fresh v4 jti.
    pub fn new_access_token(principal: &Principal, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: principal.id.to_string(),
            username: principal.username.clone(),
            scope: principal.scopes.clone(),
            iss: JWT_ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Parses the subject claim back into a principal id.
    pub fn principal_id(&self) -> Result<i64, TokenError> {
        self.sub.parse::<i64>().map_err(|_| TokenError::InvalidClaims)
    }

    /// Rebuilds the principal snapshot embedded at issuance time.
    pub fn principal(&self) -> Result<Principal, TokenError> {
        Ok(Principal {
            id: self.principal_id()?,
            username: self.username.clone(),
            scopes: self.scope.clone(),
        })
    }

    /// Expiry instant of the token.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(|| DateTime::<Utc>::MAX_UTC)
    }

    /// Checks whether the claims are expired at the given instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// Refresh token entity stored in the database.
///
/// Exactly one row exists per jti while the token is active; consuming
/// it (rotation or logout) deletes the row, which is what makes a
/// refresh token single-use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Unique identifier (jti), the rotation key
    pub id: Uuid,

    /// Principal this token belongs to
    pub user_id: i64,

    /// SHA-256 hex digest of the secret; the raw secret never persists
    pub token_hash: String,

    /// Timestamp when the token was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Creates a new refresh token row.
    pub fn new(user_id: i64, token_hash: String, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// Checks whether the token is past its expiry at the given instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Revocation list record.
///
/// The existence of a row for a jti marks that access token dead
/// regardless of its embedded expiry claim. The record expires when
/// the token it kills would have expired anyway, which bounds the
/// growth of the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationRecord {
    /// jti of the revoked access token
    pub jti: String,

    /// The revoked token's own expiry timestamp
    pub expires_at: DateTime<Utc>,
}

impl RevocationRecord {
    /// Creates a revocation record for the given jti.
    pub fn new(jti: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            jti: jti.into(),
            expires_at,
        }
    }

    /// Checks whether the record can be reaped at the given instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Token pair returned to the caller after issuance or rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed JWT access token
    pub access_token: String,

    /// Opaque refresh token in `jti.secret` form
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair with the configured lifetimes.
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in,
            refresh_expires_in,
        }
    }
}
