//! Domain entities representing core business objects.

pub mod account;
pub mod session;

// Re-export commonly used types
pub use account::{Account, RESET_TOKEN_TTL_MINUTES, VERIFICATION_CODE_TTL_MINUTES};
pub use session::Claims;
