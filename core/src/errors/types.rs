//! Domain-specific error types for the account lifecycle
//!
//! This module provides error type definitions for account, session, and
//! token operations. Display strings double as the user-facing messages
//! rendered by the presentation layer.

use thiserror::Error;

/// Account lifecycle errors
///
/// These errors represent the failure scenarios of registration, OTP
/// verification, login, and password reset.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AccountError {
    #[error("Invalid phone number")]
    InvalidPhoneFormat,

    #[error("Invalid OTP")]
    InvalidOtp,

    #[error("OTP Expired")]
    OtpExpired,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not authenticated")]
    NotAuthenticated,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Email or phone is already registered")]
    AlreadyRegistered,

    #[error("Too many registration attempts. Please try again after one hour")]
    TooManyAttempts,

    #[error("Password and confirm password do not match")]
    PasswordMismatch,

    #[error("Invalid or expired reset password token")]
    InvalidResetToken,
}

/// Session token errors
///
/// These errors represent failures while issuing or verifying the signed
/// session token carried in the cookie.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Session token has expired")]
    Expired,

    #[error("Invalid session token")]
    Invalid,

    #[error("Session token generation failed")]
    GenerationFailed,
}
