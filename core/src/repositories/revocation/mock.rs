//! In-memory implementation of `RevocationRepository` for testing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::RevocationRecord;
use crate::errors::DomainError;

use super::r#trait::RevocationRepository;

/// Mock revocation list keyed by jti.
///
/// Can be switched into a failing mode to exercise the fail-closed
/// behavior of callers.
#[derive(Default)]
pub struct MockRevocationRepository {
    records: Arc<RwLock<HashMap<String, RevocationRecord>>>,
    fail: AtomicBool,
}

impl MockRevocationRepository {
    /// Create a new empty mock list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation return a store error.
    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    /// Number of records currently held.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "revocation store offline".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RevocationRepository for MockRevocationRepository {
    async fn insert(&self, record: RevocationRecord) -> Result<(), DomainError> {
        self.check_available()?;
        let mut records = self.records.write().await;
        records.entry(record.jti.clone()).or_insert(record);
        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        let records = self.records.read().await;
        Ok(records.contains_key(jti))
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        self.check_available()?;
        let mut records = self.records.write().await;
        let before = records.len();

        records.retain(|_, record| !record.is_expired(now));

        Ok(before - records.len())
    }
}
