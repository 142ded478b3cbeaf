//! Session authentication configuration

use serde::{Deserialize, Serialize};

use super::environment::Environment;

const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";

/// Session token and cookie configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Secret key for signing session tokens
    pub jwt_secret: String,

    /// Session lifetime in days (token expiry and cookie max-age)
    pub session_ttl_days: i64,

    /// Session cookie name
    pub cookie_name: String,

    /// Session cookie secure flag (HTTPS only)
    pub cookie_secure: bool,

    /// Session cookie HttpOnly flag
    #[serde(default = "default_http_only")]
    pub http_only: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::from(DEFAULT_SECRET),
            session_ttl_days: 7,
            cookie_name: String::from("token"),
            cookie_secure: false,
            http_only: default_http_only(),
        }
    }
}

impl SessionConfig {
    /// Create a new session configuration with a signing secret
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables. The secure-cookie flag defaults
    /// to on in production and off elsewhere.
    pub fn from_env(environment: Environment) -> Self {
        let jwt_secret =
            std::env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_SECRET.to_string());
        let session_ttl_days = std::env::var("SESSION_TTL_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse()
            .unwrap_or(7);
        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or_else(|_| environment.is_production());

        Self {
            jwt_secret,
            session_ttl_days,
            cookie_name: String::from("token"),
            cookie_secure,
            http_only: default_http_only(),
        }
    }

    /// Check if using the default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_SECRET
    }
}

fn default_http_only() -> bool {
    true
}
