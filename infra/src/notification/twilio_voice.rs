//! Twilio voice-call delivery of verification codes.
//!
//! Places an outbound call through the Twilio Calls API with an inline
//! TwiML script that reads the code to the recipient. The script speaks
//! the digits one at a time and repeats the code once.

use std::time::Duration;

use tracing::{debug, error, info};

use ak_core::services::notification::NotificationError;
use ak_shared::utils::phone::{dialable, mask_phone_number};

use crate::InfraError;

/// Twilio voice-call configuration
#[derive(Debug, Clone)]
pub struct TwilioVoiceConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// From phone number (must be a Twilio phone number)
    pub from_number: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl TwilioVoiceConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfraError> {
        let account_sid = std::env::var("TWILIO_ACCOUNT_SID")
            .map_err(|_| InfraError::Config("TWILIO_ACCOUNT_SID not set".to_string()))?;
        let auth_token = std::env::var("TWILIO_AUTH_TOKEN")
            .map_err(|_| InfraError::Config("TWILIO_AUTH_TOKEN not set".to_string()))?;
        let from_number = std::env::var("TWILIO_FROM_NUMBER")
            .map_err(|_| InfraError::Config("TWILIO_FROM_NUMBER not set".to_string()))?;

        if !from_number.starts_with('+') {
            return Err(InfraError::Config(
                "TWILIO_FROM_NUMBER must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        Ok(Self {
            account_sid,
            auth_token,
            from_number,
            request_timeout_secs: std::env::var("TWILIO_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }
}

/// Twilio voice caller
pub struct TwilioVoiceCaller {
    client: reqwest::Client,
    config: TwilioVoiceConfig,
}

impl TwilioVoiceCaller {
    /// Create a new voice caller
    pub fn new(config: TwilioVoiceConfig) -> Result<Self, InfraError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            "Twilio voice caller initialized with from number: {}",
            mask_phone_number(&config.from_number)
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfraError> {
        let config = TwilioVoiceConfig::from_env()?;
        Self::new(config)
    }

    /// Place a call that reads the verification code to the recipient
    ///
    /// Errors surface to the caller; there is no automatic retry.
    pub async fn place_call(&self, to: &str, code: &str) -> Result<(), NotificationError> {
        let url = format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Calls.json",
            self.config.account_sid
        );
        let to_number = dialable(to);
        let twiml = call_script(code);

        debug!("Placing voice call to {}", mask_phone_number(to));

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&[
                ("To", to_number.as_str()),
                ("From", self.config.from_number.as_str()),
                ("Twiml", twiml.as_str()),
            ])
            .send()
            .await
            .map_err(|e| NotificationError::Voice(format!("Twilio request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(
                "Twilio call to {} rejected with status {}: {}",
                mask_phone_number(to),
                status,
                body
            );
            return Err(NotificationError::Voice(format!(
                "Twilio call rejected with status {}",
                status
            )));
        }

        info!("Voice call placed to {}", mask_phone_number(to));
        Ok(())
    }
}

/// Render the code as digits separated by spaces so the voice reads them
/// one at a time
fn spoken_digits(code: &str) -> String {
    code.chars()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the TwiML script for one verification call
fn call_script(code: &str) -> String {
    let digits = spoken_digits(code);
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <Response><Say voice=\"alice\">Your verification code is {}. \
         I repeat, your verification code is {}.</Say></Response>",
        digits, digits
    )
}
