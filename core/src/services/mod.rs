//! Business services containing domain logic and use cases.

pub mod account;
pub mod notification;
pub mod token;

// Re-export commonly used types
pub use account::{
    AccountService, AccountServiceConfig, NewRegistration, Registration, VerificationMethod,
};
pub use notification::{EmailMessage, NotificationError, NotificationGateway};
pub use token::{ResetToken, TokenConfig, TokenService};
