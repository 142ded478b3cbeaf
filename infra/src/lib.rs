//! # AuthKit Infrastructure
//!
//! This crate implements the infrastructure layer for the AuthKit backend.
//! It provides concrete implementations for the seams the core crate
//! declares as traits:
//!
//! - **Database**: MySQL persistence via SQLx (`AccountRepository` impl)
//! - **Notification**: SMTP email (lettre) and Twilio voice-call delivery
//! - **Reaper**: background cleanup of stale unverified accounts

pub mod database;
pub mod notification;
pub mod reaper;

pub use database::{DatabasePool, MySqlAccountRepository};
pub use notification::{
    create_notification_gateway, ConsoleNotificationGateway, LiveNotificationGateway, SmtpConfig,
    SmtpMailer, TwilioVoiceCaller, TwilioVoiceConfig,
};
pub use reaper::{AccountReaper, ReaperConfig};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfraError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email transport error
    #[error("Email transport error: {0}")]
    Email(String),
}
