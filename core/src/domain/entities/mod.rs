//! Domain entities owned by the token engine.

pub mod principal;
pub mod token;

pub use principal::Principal;
pub use token::{Claims, RefreshToken, RevocationRecord, TokenPair};
