//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the TourPass
//! token engine, following Clean Architecture principles. It provides
//! the MySQL-backed implementations of the store traits defined in
//! `tp_core`.
//!
//! The core crate never sees SQL: it talks to `RefreshTokenRepository`
//! and `RevocationRepository`, and this crate plugs concrete MySQL
//! repositories into those seams.

// Re-export core error types for convenience
pub use tp_core::errors::*;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
