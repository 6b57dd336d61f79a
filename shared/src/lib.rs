//! Shared configuration types for TourPass server crates
//!
//! This crate holds the configuration structs used across the server
//! modules. Each sub-module knows how to build itself from environment
//! variables so every crate loads configuration the same way.

pub mod config;

// Re-export commonly used items at crate root
pub use config::{AuthConfig, DatabaseConfig, Environment, JwtConfig};
