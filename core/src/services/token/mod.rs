//! Token service module
//!
//! This module handles all token-related operations:
//! - Access token encoding and signature verification
//! - Issuance, introspection, refresh rotation and revocation
//! - The per-request validation pipeline
//! - Background cleanup of expired rows

mod cleanup;
mod codec;
mod config;
mod service;
mod validation;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupConfig, CleanupResult, CleanupService};
pub use codec::TokenCodec;
pub use config::TokenServiceConfig;
pub use service::TokenService;
pub use validation::{
    ClaimsValidator, RevocationValidator, TimestampValidator, ValidationPipeline,
};
