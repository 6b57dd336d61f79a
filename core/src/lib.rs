//! # TourPass Core
//!
//! Token lifecycle engine for the TourPass backend: issuing signed
//! access tokens, rotating refresh tokens, validating inbound tokens
//! against signature, expiry and the server-side revocation list, and
//! invalidating tokens on logout. The HTTP layer and user storage are
//! external collaborators that call into this crate through the
//! `TokenService` surface and the repository traits.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
