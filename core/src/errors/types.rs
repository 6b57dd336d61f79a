//! Token lifecycle error taxonomy.
//!
//! Every variant here is for internal logging and metrics only. The
//! presentation layer must collapse all of them (except
//! `StoreUnavailable`, which is a retryable server fault) into one
//! generic "invalid token" response so callers cannot distinguish
//! expired from revoked from forged.

use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Token structure cannot be parsed at all
    #[error("Malformed token")]
    Malformed,

    /// MAC verification failed, or the header names a different algorithm
    #[error("Token signature verification failed")]
    SignatureInvalid,

    /// Past the embedded expiry claim
    #[error("Token expired")]
    Expired,

    /// Issued-at lies in the future beyond the tolerated clock skew
    #[error("Token not yet valid")]
    NotYetValid,

    /// Signature is fine but the claims are unusable
    #[error("Invalid token claims")]
    InvalidClaims,

    /// jti is present in the revocation list
    #[error("Token revoked")]
    Revoked,

    /// No refresh token row for the presented value, including
    /// rows already consumed by a rotation or logout
    #[error("Refresh token not found")]
    RefreshNotFound,

    /// Refresh token row exists but is past its expiry
    #[error("Refresh token expired")]
    RefreshExpired,

    /// A store operation failed or timed out; always fail-closed
    #[error("Token store unavailable during {operation}")]
    StoreUnavailable { operation: &'static str },

    /// Signing or serializing a new token failed
    #[error("Token generation failed")]
    GenerationFailed,
}

impl TokenError {
    /// Stable code for logs and metrics.
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::Malformed => "MALFORMED",
            TokenError::SignatureInvalid => "SIGNATURE_INVALID",
            TokenError::Expired => "EXPIRED",
            TokenError::NotYetValid => "NOT_YET_VALID",
            TokenError::InvalidClaims => "INVALID_CLAIMS",
            TokenError::Revoked => "REVOKED",
            TokenError::RefreshNotFound => "REFRESH_NOT_FOUND",
            TokenError::RefreshExpired => "REFRESH_EXPIRED",
            TokenError::StoreUnavailable { .. } => "STORE_UNAVAILABLE",
            TokenError::GenerationFailed => "GENERATION_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(TokenError::Expired.code(), "EXPIRED");
        assert_eq!(TokenError::Revoked.code(), "REVOKED");
        assert_eq!(
            TokenError::StoreUnavailable { operation: "is_revoked" }.code(),
            "STORE_UNAVAILABLE"
        );
    }

    #[test]
    fn test_store_unavailable_names_operation() {
        let err = TokenError::StoreUnavailable { operation: "consume" };
        assert!(err.to_string().contains("consume"));
    }
}
