//! Configuration for the session token service

/// Configuration for signing and verifying session tokens
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Secret used for HS256 signing and verification
    pub jwt_secret: String,
    /// Session lifetime in days
    pub session_ttl_days: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            session_ttl_days: 7,
        }
    }
}

impl TokenConfig {
    /// Create a configuration with an explicit secret and the default lifetime.
    pub fn with_secret(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            ..Self::default()
        }
    }
}
