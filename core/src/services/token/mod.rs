//! Session token service module
//!
//! This module handles all token-related operations including:
//! - Session JWT issuing and verification (HS256)
//! - Password-reset token generation and hashing

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenConfig;
pub use service::{ResetToken, TokenService};
