//! Principal provider trait, the inbound collaborator that supplies
//! identity snapshots.

use async_trait::async_trait;

use crate::domain::entities::Principal;
use crate::errors::DomainError;

/// Supplies principal snapshots by stable identifier.
///
/// Implemented by the external user-management layer; the token engine
/// only reads snapshots through it when rotating a refresh token, so a
/// freshly minted access token reflects the current username and
/// scopes.
#[async_trait]
pub trait PrincipalProvider: Send + Sync {
    /// Look up a principal by its stable identifier.
    ///
    /// # Returns
    /// * `Ok(Some(Principal))` - Principal found
    /// * `Ok(None)` - No such principal (e.g. account deleted)
    /// * `Err(DomainError)` - Lookup failed
    async fn find_by_id(&self, id: i64) -> Result<Option<Principal>, DomainError>;
}
