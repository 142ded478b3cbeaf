use actix_web::{web, HttpResponse};

use ak_core::repositories::AccountRepository;
use ak_core::services::account::AccountService;
use ak_shared::utils::validation::validators::normalize_email;

use crate::dto::{ForgotPasswordRequest, MessageResponse};
use crate::error::ApiError;

/// Handler for POST /api/v1/user/password/forgot
///
/// Emails a single-use reset link to a verified account. The raw token only
/// travels inside the email; the response merely confirms where it went.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "message": "Reset Password Link Sent to Your Email asha@example.com"
/// }
/// ```
///
/// ## Errors
/// - 404 Not Found: No verified account with that email
/// - 500 Internal Server Error: Email could not be sent
pub async fn forgot_password<R: AccountRepository + 'static>(
    service: web::Data<AccountService<R>>,
    request: web::Json<ForgotPasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    let email = normalize_email(&request.email);

    service.forgot_password(&email).await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        success: true,
        message: format!("Reset Password Link Sent to Your Email {}", email),
    }))
}
