//! Shared utilities and common types for the AuthKit server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Utility functions (phone validation, email normalization)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AppConfig, DatabaseConfig, Environment, ServerConfig, SessionConfig};
pub use utils::{phone, validation};
