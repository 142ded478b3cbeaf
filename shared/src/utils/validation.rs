//! Common validation utilities

/// Common validation functions
pub mod validators {
    /// Normalize an email address for storage and lookup
    ///
    /// Addresses are keyed case-insensitively, so both writes and lookups
    /// must pass through this.
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }
}
