//! Revocation list persistence.

mod mock;
mod r#trait;

#[cfg(test)]
mod tests;

pub use mock::MockRevocationRepository;
pub use r#trait::RevocationRepository;
