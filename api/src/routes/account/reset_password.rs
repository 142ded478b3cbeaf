use actix_web::{web, HttpResponse};

use ak_core::repositories::AccountRepository;
use ak_core::services::account::AccountService;
use ak_shared::config::SessionConfig;

use crate::dto::{ResetPasswordRequest, SessionResponse};
use crate::error::ApiError;

use super::session_cookie;

/// Handler for PUT /api/v1/user/password/reset/{token}
///
/// Completes a password reset with the raw token from the emailed link.
/// A successful reset consumes the token and signs the account in.
///
/// # Request Body
///
/// ```json
/// {
///     "password": "newsecret1",
///     "confirmPassword": "newsecret1"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "message": "Password Reset Successfully",
///     "token": "eyJhbGciOiJIUzI1NiIs...",
///     "user": { "id": "...", "name": "...", "email": "...", "phone": "..." }
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Unknown/expired/used token, missing passwords, or
///   mismatched confirmation
pub async fn reset_password<R: AccountRepository + 'static>(
    service: web::Data<AccountService<R>>,
    session_config: web::Data<SessionConfig>,
    token: web::Path<String>,
    request: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();

    let outcome = service
        .reset_password(&token, &request.password, &request.confirm_password)
        .await?;

    let cookie = session_cookie(&session_config, &outcome.session.token);
    Ok(HttpResponse::Ok().cookie(cookie).json(SessionResponse {
        success: true,
        message: "Password Reset Successfully".to_string(),
        token: outcome.session.token,
        user: Some(outcome.profile),
    }))
}
