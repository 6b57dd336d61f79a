//! Business services containing the token lifecycle logic.

pub mod token;

// Re-export commonly used types
pub use token::{
    CleanupConfig, CleanupResult, CleanupService, ClaimsValidator, RevocationValidator,
    TimestampValidator, TokenCodec, TokenService, TokenServiceConfig, ValidationPipeline,
};
