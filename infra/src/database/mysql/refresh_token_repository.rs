//! MySQL implementation of the RefreshTokenRepository trait.
//!
//! Backing table:
//!
//! ```sql
//! CREATE TABLE refresh_tokens (
//!     id         CHAR(36)    NOT NULL PRIMARY KEY,
//!     user_id    BIGINT      NOT NULL,
//!     token_hash CHAR(64)    NOT NULL UNIQUE,
//!     created_at DATETIME(6) NOT NULL,
//!     expires_at DATETIME(6) NOT NULL,
//!     INDEX idx_refresh_tokens_expires_at (expires_at)
//! );
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use tp_core::domain::entities::token::RefreshToken;
use tp_core::errors::DomainError;
use tp_core::repositories::RefreshTokenRepository;

/// MySQL-backed refresh token store.
pub struct MySqlRefreshTokenRepository {
    pool: MySqlPool,
}

impl MySqlRefreshTokenRepository {
    /// Create a new MySQL refresh token repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a RefreshToken entity
    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<RefreshToken, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;

        Ok(RefreshToken {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid token UUID: {}", e),
            })?,
            user_id: row.try_get("user_id").map_err(|e| DomainError::Internal {
                message: format!("Failed to get user_id: {}", e),
            })?,
            token_hash: row
                .try_get("token_hash")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get token_hash: {}", e),
                })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get expires_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl RefreshTokenRepository for MySqlRefreshTokenRepository {
    async fn save(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let query = r#"
            INSERT INTO refresh_tokens (id, user_id, token_hash, created_at, expires_at)
            VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(token.id.to_string())
            .bind(token.user_id)
            .bind(&token.token_hash)
            .bind(token.created_at)
            .bind(token.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                // UNIQUE(token_hash) makes a duplicate a constraint hit
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    DomainError::Validation {
                        message: "Refresh token already exists".to_string(),
                    }
                }
                other => DomainError::Internal {
                    message: format!("Failed to save refresh token: {}", other),
                },
            })?;

        Ok(token)
    }

    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        let query = r#"
            SELECT id, user_id, token_hash, created_at, expires_at
            FROM refresh_tokens
            WHERE token_hash = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find refresh token: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_token(&row)?)),
            None => Ok(None),
        }
    }

    async fn consume(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        // Read the row, then delete it keyed by hash. The DELETE is
        // the arbitration point: under concurrent calls only one
        // sees rows_affected == 1, everyone else gets None.
        let row = match self.find_by_hash(token_hash).await? {
            Some(row) => row,
            None => return Ok(None),
        };

        let deleted = sqlx::query("DELETE FROM refresh_tokens WHERE token_hash = ?")
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to consume refresh token: {}", e),
            })?;

        if deleted.rows_affected() == 1 {
            Ok(Some(row))
        } else {
            Ok(None)
        }
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at <= ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to delete expired refresh tokens: {}", e),
            })?;

        Ok(result.rows_affected() as usize)
    }
}
