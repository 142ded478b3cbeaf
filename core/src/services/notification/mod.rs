//! Notification gateway module
//!
//! Declares the outbound-delivery seam the account engine talks through:
//! the engine supplies destination and content, implementations own the
//! transport (SMTP, Twilio voice, console). Message templates live here so
//! the wording stays with the domain.

mod templates;


pub use templates::{reset_password_email, verification_email};

use async_trait::async_trait;
use thiserror::Error;

/// An email ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Body, HTML allowed
    pub body: String,
}

/// Errors surfaced by notification gateways.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotificationError {
    /// Email delivery failed
    #[error("email delivery failed: {0}")]
    Email(String),

    /// Voice call failed
    #[error("voice call failed: {0}")]
    Voice(String),
}

/// Trait for outbound notification delivery.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Send an email message.
    async fn send_email(&self, message: EmailMessage) -> Result<(), NotificationError>;

    /// Place a voice call that reads a verification code to the recipient.
    ///
    /// The gateway formats the digits for speech.
    async fn send_voice_code(&self, to: &str, code: &str) -> Result<(), NotificationError>;

    /// Name of the gateway implementation, for logging.
    fn provider_name(&self) -> &str;
}
