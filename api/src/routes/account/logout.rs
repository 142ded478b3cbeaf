use actix_web::{web, HttpResponse};

use ak_shared::config::SessionConfig;

use crate::dto::MessageResponse;
use crate::error::ApiError;
use crate::middleware::CurrentAccount;

use super::expired_session_cookie;

/// Handler for POST /api/v1/user/logout
///
/// Replaces the session cookie with an already-expired one. Guarded, so an
/// anonymous caller gets a 401 rather than a silent no-op; the token itself
/// stays valid until its expiry, sessions are stateless server-side.
pub async fn logout(
    account: CurrentAccount,
    session_config: web::Data<SessionConfig>,
) -> Result<HttpResponse, ApiError> {
    tracing::debug!(account_id = %account.0.id, "session cookie cleared");

    let cookie = expired_session_cookie(&session_config);
    Ok(HttpResponse::Ok().cookie(cookie).json(MessageResponse {
        success: true,
        message: "Logged Out Successfully".to_string(),
    }))
}
