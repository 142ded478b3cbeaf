//! Password hashing helpers

use crate::errors::{DomainError, DomainResult};

/// bcrypt cost factor for stored password hashes
const BCRYPT_COST: u32 = 10;

/// Hashes a raw password for storage.
pub(crate) fn hash_password(password: &str) -> DomainResult<String> {
    bcrypt::hash(password, BCRYPT_COST).map_err(|e| DomainError::Internal {
        message: format!("Failed to hash password: {}", e),
    })
}

/// Checks a raw password against a stored hash.
pub(crate) fn verify_password(password: &str, password_hash: &str) -> DomainResult<bool> {
    bcrypt::verify(password, password_hash).map_err(|e| DomainError::Internal {
        message: format!("Failed to verify password: {}", e),
    })
}
