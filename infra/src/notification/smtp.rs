//! SMTP email delivery via lettre.
//!
//! Production implementation of the email half of the notification
//! gateway. The transport speaks STARTTLS to the configured relay and
//! authenticates with plain credentials.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

use ak_core::services::notification::{EmailMessage, NotificationError};

use crate::InfraError;

/// SMTP relay configuration
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// Relay hostname (e.g., smtp.gmail.com)
    pub host: String,
    /// Relay port; 587 is the STARTTLS submission port
    pub port: u16,
    /// Username for relay authentication
    pub username: String,
    /// Password or app token for relay authentication
    pub password: String,
    /// Sender mailbox, name allowed (e.g., "AuthKit <no-reply@example.com>")
    pub from_address: String,
}

impl SmtpConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfraError> {
        let host = std::env::var("SMTP_HOST")
            .map_err(|_| InfraError::Config("SMTP_HOST not set".to_string()))?;
        let username = std::env::var("SMTP_USERNAME")
            .map_err(|_| InfraError::Config("SMTP_USERNAME not set".to_string()))?;
        let password = std::env::var("SMTP_PASSWORD")
            .map_err(|_| InfraError::Config("SMTP_PASSWORD not set".to_string()))?;
        let from_address = std::env::var("SMTP_FROM")
            .map_err(|_| InfraError::Config("SMTP_FROM not set".to_string()))?;

        Ok(Self {
            host,
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(587),
            username,
            password,
            from_address,
        })
    }
}

/// Async SMTP mailer backed by lettre
#[derive(Debug)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Create a new mailer from configuration
    ///
    /// Builds the transport without connecting; the first `send` opens
    /// the connection.
    pub fn new(config: SmtpConfig) -> Result<Self, InfraError> {
        let from: Mailbox = config.from_address.parse().map_err(|e| {
            InfraError::Config(format!("SMTP_FROM is not a valid mailbox: {}", e))
        })?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| InfraError::Email(format!("Failed to build SMTP transport: {}", e)))?
            .port(config.port)
            .credentials(Credentials::new(config.username, config.password))
            .build();

        info!("SMTP mailer initialized for relay {}:{}", config.host, config.port);

        Ok(Self { transport, from })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfraError> {
        let config = SmtpConfig::from_env()?;
        Self::new(config)
    }

    /// Deliver one message; the body is sent as text/html
    pub async fn send(&self, message: EmailMessage) -> Result<(), NotificationError> {
        let to: Mailbox = message
            .to
            .parse()
            .map_err(|e| NotificationError::Email(format!("Invalid recipient address: {}", e)))?;

        debug!(to = %message.to, subject = %message.subject, "Dispatching email");

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject)
            .header(ContentType::TEXT_HTML)
            .body(message.body)
            .map_err(|e| NotificationError::Email(format!("Failed to build email: {}", e)))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| NotificationError::Email(format!("Failed to send email: {}", e)))?;

        info!(to = %message.to, "Email dispatched");
        Ok(())
    }
}
