//! Background cleanup of expired refresh tokens and revocation
//! records.
//!
//! Expired rows can no longer change any validation outcome (the
//! token they belong to is naturally dead), so a periodic reaper
//! deletes them to bound store growth.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::clock::Clock;
use crate::errors::DomainError;
use crate::repositories::{RefreshTokenRepository, RevocationRepository};

/// Configuration for the cleanup service.
#[derive(Debug, Clone)]
pub struct CleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600, // Run every hour
            enabled: true,
        }
    }
}

/// Service reaping expired refresh token rows and revocation records.
pub struct CleanupService<R, B>
where
    R: RefreshTokenRepository + 'static,
    B: RevocationRepository + 'static,
{
    refresh_repo: Arc<R>,
    revocation_repo: Arc<B>,
    clock: Arc<dyn Clock>,
    config: CleanupConfig,
}

impl<R, B> CleanupService<R, B>
where
    R: RefreshTokenRepository,
    B: RevocationRepository,
{
    /// Creates a new cleanup service.
    pub fn new(
        refresh_repo: Arc<R>,
        revocation_repo: Arc<B>,
        clock: Arc<dyn Clock>,
        config: CleanupConfig,
    ) -> Self {
        Self {
            refresh_repo,
            revocation_repo,
            clock,
            config,
        }
    }

    /// Runs a single cleanup cycle over both stores.
    ///
    /// A failure in one store does not stop the other from being
    /// reaped; errors are collected into the result.
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        let now = self.clock.now();
        let mut result = CleanupResult::default();

        match self.refresh_repo.delete_expired(now).await {
            Ok(count) => {
                result.refresh_tokens_deleted = count;
                info!("Deleted {} expired refresh tokens", count);
            }
            Err(e) => {
                error!("Failed to delete expired refresh tokens: {}", e);
                result.errors.push(format!("Refresh token cleanup error: {}", e));
            }
        }

        match self.revocation_repo.delete_expired(now).await {
            Ok(count) => {
                result.revocation_records_deleted = count;
                info!("Deleted {} expired revocation records", count);
            }
            Err(e) => {
                error!("Failed to delete expired revocation records: {}", e);
                result.errors.push(format!("Revocation cleanup error: {}", e));
            }
        }

        Ok(result)
    }

    /// Starts the cleanup service as a background task.
    ///
    /// Spawns a tokio task that runs a cycle at the configured
    /// interval until the process exits.
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("Token cleanup service is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        tokio::spawn(async move {
            info!(
                "Token cleanup service started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                match self.run_cleanup().await {
                    Ok(result) => {
                        if !result.errors.is_empty() {
                            warn!("Cleanup completed with errors: {:?}", result.errors);
                        }
                    }
                    Err(e) => {
                        error!("Token cleanup cycle failed: {}", e);
                    }
                }
            }
        });
    }
}

/// Result of a cleanup cycle.
#[derive(Debug, Default)]
pub struct CleanupResult {
    /// Number of expired refresh token rows deleted
    pub refresh_tokens_deleted: usize,
    /// Number of expired revocation records deleted
    pub revocation_records_deleted: usize,
    /// Any errors encountered during cleanup
    pub errors: Vec<String>,
}

impl CleanupResult {
    /// Whether the cycle finished without errors.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of rows reaped.
    pub fn total_cleaned(&self) -> usize {
        self.refresh_tokens_deleted + self.revocation_records_deleted
    }
}
