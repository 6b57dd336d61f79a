//! In-memory implementation of `RefreshTokenRepository` for testing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

use super::r#trait::RefreshTokenRepository;

/// Mock refresh token store keyed by token hash.
///
/// `consume` is a `HashMap::remove` under the write lock, so it has
/// the same single-winner property the production store guarantees.
#[derive(Default)]
pub struct MockRefreshTokenRepository {
    tokens: Arc<RwLock<HashMap<String, RefreshToken>>>,
}

impl MockRefreshTokenRepository {
    /// Create a new empty mock store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently held.
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    /// Whether the store holds no rows.
    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }
}

#[async_trait]
impl RefreshTokenRepository for MockRefreshTokenRepository {
    async fn save(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let mut tokens = self.tokens.write().await;

        if tokens.contains_key(&token.token_hash) {
            return Err(DomainError::Validation {
                message: "Refresh token already exists".to_string(),
            });
        }

        tokens.insert(token.token_hash.clone(), token.clone());
        Ok(token)
    }

    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.get(token_hash).cloned())
    }

    async fn consume(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        let mut tokens = self.tokens.write().await;
        Ok(tokens.remove(token_hash))
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();

        tokens.retain(|_, token| !token.is_expired(now));

        Ok(before - tokens.len())
    }
}
