//! Configuration for the account service

/// Configuration for the account service
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// Base URL of the frontend, used to build password-reset links
    pub client_url: String,
    /// Pending unverified registrations allowed per identity before the
    /// attempt limit rejects further ones
    pub max_registration_attempts: u64,
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            client_url: "http://localhost:3000".to_string(),
            max_registration_attempts: 3,
        }
    }
}

impl AccountServiceConfig {
    /// Builds the reset link for a raw token.
    pub fn reset_password_url(&self, token: &str) -> String {
        format!(
            "{}/password/reset/{}",
            self.client_url.trim_end_matches('/'),
            token
        )
    }
}
