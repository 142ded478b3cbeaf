//! API error boundary.
//!
//! Every failure leaves the service as `{"success": false, "message"}` with
//! the status mapped from the domain error. Internal details are logged but
//! never serialized into the body.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, warn};
use validator::ValidationErrors;

use ak_core::errors::{AccountError, DomainError, TokenError};

/// Uniform error body shape
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
}

/// Error wrapper carrying a domain error across the HTTP boundary
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub DomainError);

impl ApiError {
    /// Message rendered into the response body
    ///
    /// Internal failures get a fixed message; everything else uses the
    /// domain error's display string.
    fn public_message(&self) -> String {
        match &self.0 {
            DomainError::Internal { .. } | DomainError::Token(TokenError::GenerationFailed) => {
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(error: AccountError) -> Self {
        ApiError(error.into())
    }
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        ApiError(error.into())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError(DomainError::Validation {
            message: validation_message(&errors),
        })
    }
}

/// Pick one human-readable message out of a validator error set
fn validation_message(errors: &ValidationErrors) -> String {
    for field_errors in errors.field_errors().values() {
        if let Some(first) = field_errors.first() {
            if let Some(message) = &first.message {
                return message.to_string();
            }
        }
    }
    "Invalid request data".to_string()
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            DomainError::Validation { .. } => StatusCode::BAD_REQUEST,

            DomainError::Account(error) => match error {
                AccountError::InvalidPhoneFormat
                | AccountError::PasswordMismatch
                | AccountError::OtpExpired
                | AccountError::InvalidResetToken => StatusCode::BAD_REQUEST,
                AccountError::InvalidOtp
                | AccountError::InvalidCredentials
                | AccountError::NotAuthenticated => StatusCode::UNAUTHORIZED,
                AccountError::AccountNotFound => StatusCode::NOT_FOUND,
                AccountError::AlreadyRegistered => StatusCode::CONFLICT,
                AccountError::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,
            },

            DomainError::Token(error) => match error {
                TokenError::Expired => StatusCode::BAD_REQUEST,
                TokenError::Invalid => StatusCode::UNAUTHORIZED,
                TokenError::GenerationFailed => StatusCode::INTERNAL_SERVER_ERROR,
            },

            DomainError::Delivery { .. } | DomainError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            error!(status = %status, "request failed: {}", self.0);
        } else if status == StatusCode::UNAUTHORIZED {
            debug!(status = %status, "request rejected: {}", self.0);
        } else {
            warn!(status = %status, "request rejected: {}", self.0);
        }

        HttpResponse::build(status).json(ErrorBody {
            success: false,
            message: self.public_message(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases: Vec<(ApiError, StatusCode)> = vec![
            (
                DomainError::validation("All fields are required").into(),
                StatusCode::BAD_REQUEST,
            ),
            (
                AccountError::InvalidPhoneFormat.into(),
                StatusCode::BAD_REQUEST,
            ),
            (AccountError::OtpExpired.into(), StatusCode::BAD_REQUEST),
            (
                AccountError::InvalidResetToken.into(),
                StatusCode::BAD_REQUEST,
            ),
            (AccountError::InvalidOtp.into(), StatusCode::UNAUTHORIZED),
            (
                AccountError::InvalidCredentials.into(),
                StatusCode::UNAUTHORIZED,
            ),
            (
                AccountError::NotAuthenticated.into(),
                StatusCode::UNAUTHORIZED,
            ),
            (AccountError::AccountNotFound.into(), StatusCode::NOT_FOUND),
            (AccountError::AlreadyRegistered.into(), StatusCode::CONFLICT),
            (
                AccountError::TooManyAttempts.into(),
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (TokenError::Expired.into(), StatusCode::BAD_REQUEST),
            (TokenError::Invalid.into(), StatusCode::UNAUTHORIZED),
            (
                DomainError::internal("boom").into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status_code(), expected, "for {:?}", error);
        }
    }

    #[test]
    fn test_internal_details_not_exposed() {
        let error: ApiError = DomainError::internal("connection pool exhausted").into();
        assert_eq!(error.public_message(), "Internal Server Error");
    }

    #[test]
    fn test_domain_message_passes_through() {
        let error: ApiError = AccountError::AlreadyRegistered.into();
        assert_eq!(
            error.public_message(),
            "Email or phone is already registered"
        );
    }

    #[test]
    fn test_delivery_message_keeps_reason() {
        let error: ApiError = ApiError(DomainError::Delivery {
            message: "smtp relay refused".to_string(),
        });
        assert_eq!(
            error.public_message(),
            "Failed to send notification: smtp relay refused"
        );
    }
}
