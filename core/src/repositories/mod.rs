//! Repository traits owned by the token engine, plus in-memory mocks.
//!
//! Refresh token rows and revocation records are mutated only through
//! the `TokenService`; no other component writes them.

pub mod principal;
pub mod refresh_token;
pub mod revocation;

pub use principal::{MockPrincipalProvider, PrincipalProvider};
pub use refresh_token::{MockRefreshTokenRepository, RefreshTokenRepository};
pub use revocation::{MockRevocationRepository, RevocationRepository};
