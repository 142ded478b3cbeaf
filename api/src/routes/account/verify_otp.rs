use actix_web::{web, HttpResponse};

use ak_core::errors::DomainError;
use ak_core::repositories::AccountRepository;
use ak_core::services::account::AccountService;
use ak_shared::config::SessionConfig;
use ak_shared::utils::validation::validators::normalize_email;

use crate::dto::{SessionResponse, VerifyOtpRequest};
use crate::error::ApiError;

use super::session_cookie;

/// Handler for POST /api/v1/user/otp-verification
///
/// Checks the submitted code against the newest pending registration for
/// the identity and marks the account verified. Older duplicate
/// registrations for the same identity are discarded in the process.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "message": "Account Verified",
///     "token": "eyJhbGciOiJIUzI1NiIs...",
///     "user": { "id": "...", "name": "...", "email": "...", "phone": "..." }
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Missing fields, bad phone, or expired code
/// - 401 Unauthorized: Wrong code
/// - 404 Not Found: No pending registration for the identity
pub async fn verify_otp<R: AccountRepository + 'static>(
    service: web::Data<AccountService<R>>,
    session_config: web::Data<SessionConfig>,
    request: web::Json<VerifyOtpRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();

    if request.has_missing_fields() {
        return Err(DomainError::validation("All fields are required").into());
    }

    let outcome = service
        .verify_otp(
            &normalize_email(&request.email),
            request.otp.trim(),
            request.phone.trim(),
        )
        .await?;

    let cookie = session_cookie(&session_config, &outcome.session.token);
    Ok(HttpResponse::Ok().cookie(cookie).json(SessionResponse {
        success: true,
        message: "Account Verified".to_string(),
        token: outcome.session.token,
        user: Some(outcome.profile),
    }))
}
