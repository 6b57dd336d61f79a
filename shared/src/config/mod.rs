//! Configuration module with per-concern sub-modules
//!
//! - `auth` - Token signing and lifetime configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection

pub mod auth;
pub mod database;
pub mod environment;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig};
pub use database::DatabaseConfig;
pub use environment::Environment;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load the full configuration from environment variables
    ///
    /// Reads a `.env` file first if one is present, so local
    /// development picks up the same variables deployment does.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            environment: Environment::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}
