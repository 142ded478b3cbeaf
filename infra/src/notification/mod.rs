//! Notification delivery module
//!
//! Implementations of the core `NotificationGateway` seam:
//!
//! - **SMTP email**: production delivery via lettre (`SmtpMailer`)
//! - **Twilio voice**: verification calls via the Calls API (`TwilioVoiceCaller`)
//! - **Console**: development fallback that logs deliveries
//!
//! The live gateway composes the SMTP and Twilio halves; the factory
//! selects an implementation from configuration and falls back to the
//! console gateway when live credentials are missing.

use std::sync::Arc;

use async_trait::async_trait;

use ak_core::services::notification::{EmailMessage, NotificationError, NotificationGateway};

use crate::InfraError;

pub mod console;
pub mod smtp;
pub mod twilio_voice;

pub use console::ConsoleNotificationGateway;
pub use smtp::{SmtpConfig, SmtpMailer};
pub use twilio_voice::{TwilioVoiceCaller, TwilioVoiceConfig};

/// Production gateway: SMTP for email, Twilio for voice calls
pub struct LiveNotificationGateway {
    mailer: SmtpMailer,
    caller: TwilioVoiceCaller,
}

impl LiveNotificationGateway {
    /// Create a gateway from already-built halves
    pub fn new(mailer: SmtpMailer, caller: TwilioVoiceCaller) -> Self {
        Self { mailer, caller }
    }

    /// Create a gateway from environment variables
    ///
    /// Requires the full SMTP_* and TWILIO_* variable sets.
    pub fn from_env() -> Result<Self, InfraError> {
        let mailer = SmtpMailer::from_env()?;
        let caller = TwilioVoiceCaller::from_env()?;
        Ok(Self::new(mailer, caller))
    }
}

#[async_trait]
impl NotificationGateway for LiveNotificationGateway {
    async fn send_email(&self, message: EmailMessage) -> Result<(), NotificationError> {
        self.mailer.send(message).await
    }

    async fn send_voice_code(&self, to: &str, code: &str) -> Result<(), NotificationError> {
        self.caller.place_call(to, code).await
    }

    fn provider_name(&self) -> &str {
        "Live"
    }
}

/// Create a notification gateway based on configuration
///
/// Returns the live SMTP + Twilio gateway when `provider` is `"live"`
/// and the credentials resolve; otherwise the console gateway.
///
/// # Arguments
///
/// * `provider` - Provider name from configuration (`"live"` or `"console"`)
pub fn create_notification_gateway(provider: &str) -> Arc<dyn NotificationGateway> {
    match provider {
        "live" => match LiveNotificationGateway::from_env() {
            Ok(gateway) => Arc::new(gateway),
            Err(e) => {
                tracing::error!("Failed to initialize live notification gateway: {}", e);
                tracing::warn!("Falling back to console notification gateway");
                Arc::new(ConsoleNotificationGateway::new())
            }
        },
        "console" => Arc::new(ConsoleNotificationGateway::new()),
        _ => {
            tracing::warn!(
                "Unknown notification provider '{}', using console implementation",
                provider
            );
            Arc::new(ConsoleNotificationGateway::new())
        }
    }
}
