//! Authentication outcome value objects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::account_profile::AccountProfile;

/// A signed session token together with its expiry
///
/// The expiry is carried alongside the token so the HTTP layer can align
/// the cookie max-age with the claim inside the token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionToken {
    /// Signed JWT carrying the account id
    pub token: String,

    /// Instant the token stops being accepted
    pub expires_at: DateTime<Utc>,
}

impl SessionToken {
    /// Creates a new session token
    pub fn new(token: String, expires_at: DateTime<Utc>) -> Self {
        Self { token, expires_at }
    }
}

/// Result of an operation that establishes a session
///
/// Returned by OTP verification, login, and password reset; the HTTP layer
/// turns it into a cookie plus a JSON body echoing the token and profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    /// Session token to set as cookie and echo in the body
    pub session: SessionToken,

    /// Profile of the authenticated account
    pub profile: AccountProfile,
}

impl AuthOutcome {
    /// Creates a new authentication outcome
    pub fn new(session: SessionToken, profile: AccountProfile) -> Self {
        Self { session, profile }
    }
}
