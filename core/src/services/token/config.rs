//! Configuration for the token service.

use std::time::Duration;

use tp_shared::config::auth::JwtConfig;

/// Configuration for the token service.
///
/// One instance per process, passed explicitly to every component
/// that needs it; there is no ambient/global lookup.
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Symmetric signing secret, read once at startup
    pub secret: String,
    /// Access token lifetime in seconds
    pub access_token_ttl_seconds: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_ttl_seconds: i64,
    /// Tolerated clock drift between issuer and verifier, in seconds
    pub clock_skew_seconds: i64,
    /// Deadline for any single store operation
    pub store_timeout: Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            secret: "development-secret-please-change-in-production".to_string(),
            access_token_ttl_seconds: 900,      // 15 minutes
            refresh_token_ttl_seconds: 604800,  // 7 days
            clock_skew_seconds: 30,
            store_timeout: Duration::from_secs(5),
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(jwt: &JwtConfig) -> Self {
        Self {
            secret: jwt.secret.clone(),
            access_token_ttl_seconds: jwt.access_token_expiry,
            refresh_token_ttl_seconds: jwt.refresh_token_expiry,
            clock_skew_seconds: jwt.clock_skew,
            store_timeout: Duration::from_millis(jwt.store_timeout_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_jwt_config() {
        let jwt = JwtConfig::new("prod-secret")
            .with_access_expiry_minutes(15)
            .with_refresh_expiry_days(14);

        let config = TokenServiceConfig::from(&jwt);

        assert_eq!(config.secret, "prod-secret");
        assert_eq!(config.access_token_ttl_seconds, 900);
        assert_eq!(config.refresh_token_ttl_seconds, 1209600);
        assert_eq!(config.store_timeout, Duration::from_secs(5));
    }
}
