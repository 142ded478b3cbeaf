//! Account entity representing a registered user account.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use uuid::Uuid;

use crate::domain::value_objects::AccountProfile;

/// Expiration time for verification codes (5 minutes)
pub const VERIFICATION_CODE_TTL_MINUTES: i64 = 5;

/// Expiration time for reset-password tokens (15 minutes)
pub const RESET_TOKEN_TTL_MINUTES: i64 = 15;

/// Account entity representing a registered (possibly not yet verified) user
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Phone number with country code (e.g., "+91 9876543210")
    pub phone: String,

    /// bcrypt hash of the password; the raw password never reaches the entity
    pub password_hash: String,

    /// Whether the account has passed OTP verification
    pub account_verified: bool,

    /// Pending 5-digit verification code, present only between
    /// registration and verification
    pub verification_code: Option<u32>,

    /// Expiry of the pending verification code; set and cleared together
    /// with `verification_code`
    pub verification_code_expires_at: Option<DateTime<Utc>>,

    /// sha256 hex digest of the outstanding reset-password token
    pub reset_password_token_hash: Option<String>,

    /// Expiry of the outstanding reset token; set and cleared together
    /// with `reset_password_token_hash`
    pub reset_password_expires_at: Option<DateTime<Utc>>,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new unverified account from an already-hashed password
    pub fn new(name: String, email: String, phone: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            phone,
            password_hash,
            account_verified: false,
            verification_code: None,
            verification_code_expires_at: None,
            reset_password_token_hash: None,
            reset_password_expires_at: None,
            created_at: Utc::now(),
        }
    }

    /// Generates a 5-digit verification code whose first digit is never zero
    ///
    /// The first digit is drawn from 1-9 and the remaining four digits from
    /// 0000-9999, so the value is always in 10000..=99999.
    fn generate_verification_code() -> u32 {
        let mut rng = rand::thread_rng();
        let first_digit: u32 = rng.gen_range(1..=9);
        let remaining_digits: u32 = rng.gen_range(0..10_000);
        first_digit * 10_000 + remaining_digits
    }

    /// Issues a fresh verification code with the standard expiry and
    /// returns it for delivery
    pub fn issue_verification_code(&mut self) -> u32 {
        let code = Self::generate_verification_code();
        self.verification_code = Some(code);
        self.verification_code_expires_at =
            Some(Utc::now() + Duration::minutes(VERIFICATION_CODE_TTL_MINUTES));
        code
    }

    /// Clears the pending verification code pair
    pub fn clear_verification_code(&mut self) {
        self.verification_code = None;
        self.verification_code_expires_at = None;
    }

    /// Checks whether the pending verification code has expired
    ///
    /// An account without a pending code reports expired.
    pub fn verification_code_expired(&self) -> bool {
        match self.verification_code_expires_at {
            Some(expires_at) => Utc::now() > expires_at,
            None => true,
        }
    }

    /// Marks the account as verified and clears the code pair
    pub fn mark_verified(&mut self) {
        self.account_verified = true;
        self.clear_verification_code();
    }

    /// Stores a reset-password token hash with the standard expiry
    pub fn set_reset_password_token(&mut self, token_hash: String) {
        self.reset_password_token_hash = Some(token_hash);
        self.reset_password_expires_at =
            Some(Utc::now() + Duration::minutes(RESET_TOKEN_TTL_MINUTES));
    }

    /// Clears the reset-password token pair
    pub fn clear_reset_password_token(&mut self) {
        self.reset_password_token_hash = None;
        self.reset_password_expires_at = None;
    }

    /// Replaces the stored password hash
    pub fn set_password(&mut self, password_hash: String) {
        self.password_hash = password_hash;
    }

    /// Returns the outward-facing projection of this account
    pub fn profile(&self) -> AccountProfile {
        AccountProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}
