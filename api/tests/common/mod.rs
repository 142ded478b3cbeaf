//! Shared wiring for HTTP-level integration tests.
//!
//! Assembles the full application around the in-memory repository and a
//! recording notification gateway, so tests can drive real requests and
//! then assert on persisted rows and captured deliveries.

use std::sync::{Arc, Mutex};

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use async_trait::async_trait;

use ak_core::repositories::{AccountRepository, MockAccountRepository};
use ak_core::services::account::{AccountService, AccountServiceConfig};
use ak_core::services::notification::{EmailMessage, NotificationError, NotificationGateway};
use ak_core::services::token::{TokenConfig, TokenService};
use ak_shared::config::SessionConfig;

pub const CLIENT_URL: &str = "http://localhost:3000";

/// Notification gateway that records every delivery and can be switched to
/// fail on demand.
pub struct RecordingGateway {
    pub emails: Mutex<Vec<EmailMessage>>,
    pub calls: Mutex<Vec<(String, String)>>,
    fail: Mutex<bool>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self {
            emails: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            fail: Mutex::new(false),
        }
    }

    pub fn set_fail(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    pub fn last_email(&self) -> Option<EmailMessage> {
        self.emails.lock().unwrap().last().cloned()
    }

    pub fn last_call(&self) -> Option<(String, String)> {
        self.calls.lock().unwrap().last().cloned()
    }

    pub fn email_count(&self) -> usize {
        self.emails.lock().unwrap().len()
    }
}

#[async_trait]
impl NotificationGateway for RecordingGateway {
    async fn send_email(&self, message: EmailMessage) -> Result<(), NotificationError> {
        if *self.fail.lock().unwrap() {
            return Err(NotificationError::Email("smtp relay refused".to_string()));
        }
        self.emails.lock().unwrap().push(message);
        Ok(())
    }

    async fn send_voice_code(&self, to: &str, code: &str) -> Result<(), NotificationError> {
        if *self.fail.lock().unwrap() {
            return Err(NotificationError::Voice("twilio unreachable".to_string()));
        }
        self.calls
            .lock()
            .unwrap()
            .push((to.to_string(), code.to_string()));
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "Recording"
    }
}

/// Everything a test needs to build the app and inspect its collaborators.
pub struct TestContext {
    pub repository: Arc<MockAccountRepository>,
    pub gateway: Arc<RecordingGateway>,
    pub service: Arc<AccountService<MockAccountRepository>>,
    pub session_config: SessionConfig,
}

impl TestContext {
    pub fn new() -> Self {
        let repository = Arc::new(MockAccountRepository::new());
        let gateway = Arc::new(RecordingGateway::new());
        let token_service = Arc::new(TokenService::new(TokenConfig::with_secret("test-secret")));

        let service = Arc::new(AccountService::new(
            repository.clone(),
            gateway.clone(),
            token_service,
            AccountServiceConfig {
                client_url: CLIENT_URL.to_string(),
                ..Default::default()
            },
        ));

        Self {
            repository,
            gateway,
            service,
            session_config: SessionConfig::default(),
        }
    }
}

/// JSON payload for a registration request.
pub fn register_payload(name: &str, email: &str, phone: &str, method: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "email": email,
        "phone": phone,
        "password": "secret123",
        "verificationMethod": method,
    })
}

/// Pulls a named cookie out of a response.
pub fn response_cookie<B>(resp: &ServiceResponse<B>, name: &str) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.into_owned())
}

/// Reads the verification code currently stored for a pending registration.
pub async fn stored_verification_code(
    repository: &MockAccountRepository,
    email: &str,
    phone: &str,
) -> String {
    let entries = repository
        .find_unverified_by_email_or_phone(email, phone)
        .await
        .expect("repository lookup");
    let account = entries.first().expect("pending registration");
    account
        .verification_code
        .expect("stored verification code")
        .to_string()
}

/// Extracts the raw reset token from a reset email body.
pub fn reset_token_from_email(body: &str) -> String {
    let marker = "/password/reset/";
    let start = body.find(marker).expect("reset link in email") + marker.len();
    body[start..]
        .chars()
        .take_while(|c| c.is_ascii_hexdigit())
        .collect()
}
