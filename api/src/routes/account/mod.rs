//! Account route handlers
//!
//! One module per endpoint:
//! - Registration and OTP verification
//! - Login, logout, and the current-account profile
//! - Password reset (request and completion)
//!
//! Endpoints that establish a session attach the token as a cookie and echo
//! it in the body through [`SessionResponse`](crate::dto::SessionResponse).

pub mod forgot_password;
pub mod login;
pub mod logout;
pub mod me;
pub mod register;
pub mod reset_password;
pub mod verify_otp;

pub use forgot_password::forgot_password;
pub use login::login;
pub use logout::logout;
pub use me::me;
pub use register::register;
pub use reset_password::reset_password;
pub use verify_otp::verify_otp;

use actix_web::cookie::{time::Duration, Cookie, SameSite};

use ak_shared::config::SessionConfig;

/// Builds the session cookie carrying a freshly issued token.
///
/// Max-age mirrors the token TTL so cookie and claim expire together.
pub(crate) fn session_cookie(config: &SessionConfig, token: &str) -> Cookie<'static> {
    Cookie::build(config.cookie_name.clone(), token.to_string())
        .path("/")
        .http_only(config.http_only)
        .secure(config.cookie_secure)
        .same_site(SameSite::Strict)
        .max_age(Duration::days(config.session_ttl_days))
        .finish()
}

/// Builds the replacement cookie that ends a session.
pub(crate) fn expired_session_cookie(config: &SessionConfig) -> Cookie<'static> {
    let mut cookie = Cookie::build(config.cookie_name.clone(), "")
        .path("/")
        .http_only(config.http_only)
        .secure(config.cookie_secure)
        .same_site(SameSite::Strict)
        .finish();
    cookie.make_removal();
    cookie
}
