//! MySQL implementation of the RevocationRepository trait.
//!
//! Backing table:
//!
//! ```sql
//! CREATE TABLE revoked_tokens (
//!     jti        VARCHAR(64) NOT NULL PRIMARY KEY,
//!     expires_at DATETIME(6) NOT NULL,
//!     INDEX idx_revoked_tokens_expires_at (expires_at)
//! );
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use tp_core::domain::entities::token::RevocationRecord;
use tp_core::errors::DomainError;
use tp_core::repositories::RevocationRepository;

/// MySQL-backed revocation list.
pub struct MySqlRevocationRepository {
    pool: MySqlPool,
}

impl MySqlRevocationRepository {
    /// Create a new MySQL revocation repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RevocationRepository for MySqlRevocationRepository {
    async fn insert(&self, record: RevocationRecord) -> Result<(), DomainError> {
        // Re-revoking the same jti must stay a no-op
        let query = r#"
            INSERT INTO revoked_tokens (jti, expires_at)
            VALUES (?, ?)
            ON DUPLICATE KEY UPDATE jti = jti
        "#;

        sqlx::query(query)
            .bind(&record.jti)
            .bind(record.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to insert revocation record: {}", e),
            })?;

        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, DomainError> {
        let query = "SELECT EXISTS(SELECT 1 FROM revoked_tokens WHERE jti = ?) AS revoked";

        let row = sqlx::query(query)
            .bind(jti)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to check revocation list: {}", e),
            })?;

        let revoked: i8 = row.try_get("revoked").map_err(|e| DomainError::Internal {
            message: format!("Failed to get revocation result: {}", e),
        })?;

        Ok(revoked == 1)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at <= ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to delete expired revocation records: {}", e),
            })?;

        Ok(result.rows_affected() as usize)
    }
}
