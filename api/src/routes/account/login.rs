use actix_web::{web, HttpResponse};

use ak_core::repositories::AccountRepository;
use ak_core::services::account::AccountService;
use ak_shared::config::SessionConfig;
use ak_shared::utils::validation::validators::normalize_email;

use crate::dto::{LoginRequest, SessionResponse};
use crate::error::ApiError;

use super::session_cookie;

/// Handler for POST /api/v1/user/login
///
/// Authenticates a verified account by email and password. Unknown email
/// and wrong password produce the identical 401 so the endpoint cannot be
/// used to probe which addresses exist.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "message": "Login successful",
///     "token": "eyJhbGciOiJIUzI1NiIs...",
///     "user": { "id": "...", "name": "...", "email": "...", "phone": "..." }
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Missing email or password
/// - 401 Unauthorized: Wrong credentials or unverified account
pub async fn login<R: AccountRepository + 'static>(
    service: web::Data<AccountService<R>>,
    session_config: web::Data<SessionConfig>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();

    let outcome = service
        .login(&normalize_email(&request.email), &request.password)
        .await?;

    let cookie = session_cookie(&session_config, &outcome.session.token);
    Ok(HttpResponse::Ok().cookie(cookie).json(SessionResponse {
        success: true,
        message: "Login successful".to_string(),
        token: outcome.session.token,
        user: Some(outcome.profile),
    }))
}
