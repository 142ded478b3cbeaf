//! Account lifecycle service module
//!
//! This module provides the account engine behind the HTTP surface:
//! - Registration with OTP delivery over email or voice call
//! - OTP verification with duplicate-row reconciliation
//! - Login and session resolution
//! - Password reset with single-use emailed tokens

mod config;
mod password;
mod service;

#[cfg(test)]
mod tests;

pub use config::AccountServiceConfig;
pub use service::{AccountService, NewRegistration, Registration, VerificationMethod};
