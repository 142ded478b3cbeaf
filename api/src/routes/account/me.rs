use actix_web::HttpResponse;

use crate::dto::ProfileResponse;
use crate::error::ApiError;
use crate::middleware::CurrentAccount;

/// Handler for GET /api/v1/user/me
///
/// Returns the profile of the account behind the session cookie. The guard
/// has already resolved the account; this handler only projects it.
pub async fn me(account: CurrentAccount) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(ProfileResponse {
        success: true,
        user: account.0.profile(),
    }))
}
