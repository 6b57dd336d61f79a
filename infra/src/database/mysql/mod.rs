//! MySQL repository implementations.

mod refresh_token_repository;
mod revocation_repository;

pub use refresh_token_repository::MySqlRefreshTokenRepository;
pub use revocation_repository::MySqlRevocationRepository;
