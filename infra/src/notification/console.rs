//! Console notification gateway for development.
//!
//! Logs deliveries instead of sending them, so the full registration and
//! reset flows can be exercised without SMTP or Twilio credentials. The
//! verification code is printed in clear text; never select this gateway
//! in production.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use ak_core::services::notification::{EmailMessage, NotificationError, NotificationGateway};
use ak_shared::utils::phone::mask_phone_number;

/// Development gateway that writes deliveries to the console
#[derive(Clone)]
pub struct ConsoleNotificationGateway {
    /// Counter for emails handled
    email_count: Arc<AtomicU64>,
    /// Counter for voice calls handled
    call_count: Arc<AtomicU64>,
}

impl ConsoleNotificationGateway {
    /// Create a new console gateway
    pub fn new() -> Self {
        Self {
            email_count: Arc::new(AtomicU64::new(0)),
            call_count: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Total emails handled
    pub fn email_count(&self) -> u64 {
        self.email_count.load(Ordering::SeqCst)
    }

    /// Total voice calls handled
    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Default for ConsoleNotificationGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationGateway for ConsoleNotificationGateway {
    async fn send_email(&self, message: EmailMessage) -> Result<(), NotificationError> {
        let count = self.email_count.fetch_add(1, Ordering::SeqCst) + 1;

        println!("\n{}", "=".repeat(60));
        println!("CONSOLE GATEWAY - EMAIL #{}", count);
        println!("{}", "=".repeat(60));
        println!("To: {}", message.to);
        println!("Subject: {}", message.subject);
        println!("Body:\n{}", message.body);
        println!("{}\n", "=".repeat(60));

        info!(
            target: "notification",
            provider = "console",
            to = %message.to,
            subject = %message.subject,
            "Email delivered (console)"
        );

        Ok(())
    }

    async fn send_voice_code(&self, to: &str, code: &str) -> Result<(), NotificationError> {
        let count = self.call_count.fetch_add(1, Ordering::SeqCst) + 1;

        println!("\n{}", "=".repeat(60));
        println!("CONSOLE GATEWAY - VOICE CALL #{}", count);
        println!("{}", "=".repeat(60));
        println!("To: {}", to);
        println!("Code: {}", code);
        println!("{}\n", "=".repeat(60));

        info!(
            target: "notification",
            provider = "console",
            phone = %mask_phone_number(to),
            "Voice call delivered (console)"
        );

        Ok(())
    }

    fn provider_name(&self) -> &str {
        "Console"
    }
}
