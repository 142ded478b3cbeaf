use serde::{Deserialize, Serialize};
use validator::Validate;

use ak_core::domain::value_objects::AccountProfile;
use ak_core::services::account::VerificationMethod;

// Request bodies default missing fields so absent and empty inputs take the
// same "all fields are required" path instead of a deserialization error.

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub name: String,

    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,

    /// Full phone number with country code, e.g. "+911234567890"
    pub phone: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    /// Delivery channel for the verification code: "email" or "phone"
    pub verification_method: Option<VerificationMethod>,
}

impl Default for RegisterRequest {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            password: String::new(),
            verification_method: None,
        }
    }
}

impl RegisterRequest {
    /// True when any required field is absent or blank
    pub fn has_missing_fields(&self) -> bool {
        self.name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.phone.trim().is_empty()
            || self.password.is_empty()
            || self.verification_method.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyOtpRequest {
    pub email: String,

    /// 5-digit code as entered by the user
    pub otp: String,

    pub phone: String,
}

impl VerifyOtpRequest {
    pub fn has_missing_fields(&self) -> bool {
        self.email.trim().is_empty() || self.otp.trim().is_empty() || self.phone.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResetPasswordRequest {
    pub password: String,
    pub confirm_password: String,
}

/// Body for endpoints that only acknowledge an action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Body for endpoints that establish a session
///
/// The token is echoed alongside the cookie. The profile is present on
/// verification, login, and password reset, absent on registration where
/// the account is still unverified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<AccountProfile>,
}

/// Body for the profile endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub user: AccountProfile,
}
