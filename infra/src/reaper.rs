//! Background reaper for stale unverified accounts.
//!
//! Registration leaves unverified rows behind whenever a user abandons the
//! OTP step. This task deletes rows older than the retention window so the
//! attempt limit resets and the table stays small. Verified accounts are
//! never touched.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{error, info, warn};

use ak_core::errors::DomainError;
use ak_core::repositories::AccountRepository;

/// Configuration for the unverified-account reaper
#[derive(Debug, Clone)]
pub struct ReaperConfig {
    /// Whether the background task runs at all
    pub enabled: bool,
    /// How often to run a cycle (in seconds)
    pub interval_secs: u64,
    /// How long an unverified account may live (in minutes)
    pub retention_mins: i64,
}

impl Default for ReaperConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 1800, // Run every 30 minutes
            retention_mins: 60,  // Keep unverified rows for one hour
        }
    }
}

impl ReaperConfig {
    /// Create configuration from environment variables
    ///
    /// Missing or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: std::env::var("REAPER_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enabled),
            interval_secs: std::env::var("REAPER_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.interval_secs),
            retention_mins: std::env::var("REAPER_RETENTION_MINS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.retention_mins),
        }
    }
}

/// Periodic deleter of unverified accounts past the retention window
pub struct AccountReaper<R: AccountRepository + 'static> {
    repository: Arc<R>,
    config: ReaperConfig,
}

impl<R: AccountRepository> AccountReaper<R> {
    /// Create a new reaper
    pub fn new(repository: Arc<R>, config: ReaperConfig) -> Self {
        Self { repository, config }
    }

    /// Run a single reap cycle
    ///
    /// # Returns
    /// * `Ok(count)` - Number of rows deleted
    /// * `Err(DomainError)` - If the delete fails
    pub async fn run_cycle(&self) -> Result<u64, DomainError> {
        let cutoff = Utc::now() - Duration::minutes(self.config.retention_mins);
        let deleted = self.repository.delete_unverified_older_than(cutoff).await?;

        if deleted > 0 {
            info!("Reaped {} stale unverified accounts", deleted);
        }

        Ok(deleted)
    }

    /// Start the reaper as a background task
    ///
    /// Spawns a tokio task that runs a cycle at regular intervals. The
    /// first cycle fires immediately.
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("Account reaper is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_secs);

        tokio::spawn(async move {
            info!(
                "Account reaper started - will run every {} seconds",
                self.config.interval_secs
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_cycle().await {
                    error!("Account reap cycle failed: {}", e);
                }
            }
        });
    }
}
