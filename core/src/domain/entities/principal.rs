//! Authenticated identity snapshot embedded into issued tokens.

use serde::{Deserialize, Serialize};

/// An authenticated identity.
///
/// This is an immutable snapshot taken at issuance time: validation of
/// an access token never goes back to user storage, it reads the
/// snapshot out of the verified claims. The user record itself is
/// owned by the external user-management layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Stable user identifier
    pub id: i64,

    /// Display username
    pub username: String,

    /// Role/scope strings, treated as opaque by this crate
    pub scopes: Vec<String>,
}

impl Principal {
    /// Creates a new principal snapshot.
    pub fn new(id: i64, username: impl Into<String>, scopes: Vec<String>) -> Self {
        Self {
            id,
            username: username.into(),
            scopes,
        }
    }

    /// Checks whether the principal carries the given scope string.
    ///
    /// No hierarchy is applied; "ADMIN" does not imply "USER" here.
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_creation() {
        let principal = Principal::new(7, "alice", vec!["USER".to_string()]);

        assert_eq!(principal.id, 7);
        assert_eq!(principal.username, "alice");
        assert!(principal.has_scope("USER"));
        assert!(!principal.has_scope("ADMIN"));
    }

    #[test]
    fn test_scope_matching_is_exact() {
        let principal = Principal::new(1, "bob", vec!["ADMIN".to_string()]);

        assert!(principal.has_scope("ADMIN"));
        assert!(!principal.has_scope("admin"));
        assert!(!principal.has_scope("USER"));
    }

    #[test]
    fn test_principal_serialization() {
        let principal = Principal::new(42, "carol", vec!["USER".to_string(), "GUIDE".to_string()]);

        let json = serde_json::to_string(&principal).unwrap();
        let deserialized: Principal = serde_json::from_str(&json).unwrap();

        assert_eq!(principal, deserialized);
    }
}
