use actix_web::{web, HttpResponse};
use validator::Validate;

use ak_core::errors::DomainError;
use ak_core::repositories::AccountRepository;
use ak_core::services::account::{AccountService, NewRegistration};
use ak_shared::config::SessionConfig;
use ak_shared::utils::validation::validators::normalize_email;

use crate::dto::{RegisterRequest, SessionResponse};
use crate::error::ApiError;

use super::session_cookie;

/// Handler for POST /api/v1/user/register
///
/// Creates an unverified account and sends its 5-digit verification code
/// over the chosen channel. The session cookie is set right away; the
/// account stays unusable for login until the code is verified.
///
/// # Request Body
///
/// ```json
/// {
///     "name": "Asha",
///     "email": "asha@example.com",
///     "phone": "+911234567890",
///     "password": "secret123",
///     "verificationMethod": "email"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "message": "Verification Code Sent to Asha",
///     "token": "eyJhbGciOiJIUzI1NiIs..."
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Missing fields, bad email, short password, bad phone
/// - 409 Conflict: Email or phone already owned by a verified account
/// - 429 Too Many Requests: More than three pending registrations
/// - 500 Internal Server Error: Store failure or undeliverable code
pub async fn register<R: AccountRepository + 'static>(
    service: web::Data<AccountService<R>>,
    session_config: web::Data<SessionConfig>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();

    // Absent fields must all read as "required" before any format check.
    if request.has_missing_fields() {
        return Err(DomainError::validation("All fields are required").into());
    }
    request.validate()?;

    let method = request
        .verification_method
        .ok_or_else(|| DomainError::validation("All fields are required"))?;

    let registration = service
        .register(NewRegistration {
            name: request.name.trim().to_string(),
            email: normalize_email(&request.email),
            phone: request.phone.trim().to_string(),
            password: request.password,
            method,
        })
        .await?;

    let cookie = session_cookie(&session_config, &registration.session.token);
    Ok(HttpResponse::Ok().cookie(cookie).json(SessionResponse {
        success: true,
        message: registration.message,
        token: registration.session.token,
        user: None,
    }))
}
