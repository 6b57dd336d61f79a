//! Outcome of introspecting an access token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Principal;

/// Result of validating an access token.
///
/// A failed validation carries no detail: the precise reason
/// (malformed, forged, expired, revoked) is logged server-side only,
/// so callers cannot be used as an oracle to distinguish them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Introspection {
    /// Whether the token passed every check
    pub authenticated: bool,

    /// Principal snapshot embedded in the token, when authenticated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<Principal>,

    /// Expiry of the token, when authenticated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Introspection {
    /// Builds the outcome for a token that passed every check.
    pub fn authenticated(principal: Principal, expires_at: DateTime<Utc>) -> Self {
        Self {
            authenticated: true,
            principal: Some(principal),
            expires_at: Some(expires_at),
        }
    }

    /// Builds the generic rejection outcome.
    pub fn unauthenticated() -> Self {
        Self {
            authenticated: false,
            principal: None,
            expires_at: None,
        }
    }
}
