//! Refresh token persistence.

mod mock;
mod r#trait;

#[cfg(test)]
mod tests;

pub use mock::MockRefreshTokenRepository;
pub use r#trait::RefreshTokenRepository;
