//! In-memory implementation of `PrincipalProvider` for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::Principal;
use crate::errors::DomainError;

use super::r#trait::PrincipalProvider;

/// Mock principal directory keyed by id.
///
/// Clones share the same underlying map, so a test can keep a handle
/// and mutate the directory after handing a clone to a service.
#[derive(Clone, Default)]
pub struct MockPrincipalProvider {
    principals: Arc<RwLock<HashMap<i64, Principal>>>,
}

impl MockPrincipalProvider {
    /// Create a new empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory pre-populated with the given principals.
    pub fn with_principals(principals: Vec<Principal>) -> Self {
        let map = principals.into_iter().map(|p| (p.id, p)).collect();
        Self {
            principals: Arc::new(RwLock::new(map)),
        }
    }

    /// Add or replace a principal.
    pub async fn upsert(&self, principal: Principal) {
        self.principals.write().await.insert(principal.id, principal);
    }

    /// Remove a principal, simulating account deletion.
    pub async fn remove(&self, id: i64) {
        self.principals.write().await.remove(&id);
    }
}

#[async_trait]
impl PrincipalProvider for MockPrincipalProvider {
    async fn find_by_id(&self, id: i64) -> Result<Option<Principal>, DomainError> {
        let principals = self.principals.read().await;
        Ok(principals.get(&id).cloned())
    }
}
