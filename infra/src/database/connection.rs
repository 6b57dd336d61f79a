//! MySQL connection pool management.

use std::time::Duration;

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tracing::info;

use tp_shared::config::DatabaseConfig;

use crate::InfrastructureError;

/// Shared MySQL connection pool.
///
/// One pool per process; repositories hold a cheap clone of the inner
/// `MySqlPool`.
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Connects a pool using the given configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .connect(&config.url)
            .await?;

        info!(
            max_connections = config.max_connections,
            "database pool connected"
        );

        Ok(Self { pool })
    }

    /// Connects a pool from `DATABASE_URL` and friends.
    pub async fn from_env() -> Result<Self, InfrastructureError> {
        dotenvy::dotenv().ok();
        Self::connect(&DatabaseConfig::from_env()).await
    }

    /// Returns the inner pool for repository construction.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Verifies the database is reachable.
    pub async fn ping(&self) -> Result<(), InfrastructureError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Closes all connections in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
