pub mod auth;
pub mod cors;

pub use auth::{CurrentAccount, SessionAuthenticator, SessionGuard};
pub use cors::create_cors;
