//! Application factory
//!
//! Builds the actix `App` with every route, middleware, and piece of shared
//! state. The factory is generic over the repository so integration tests
//! can assemble the full HTTP surface around an in-memory store.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, Error, HttpResponse};
use tracing_actix_web::TracingLogger;

use ak_core::repositories::AccountRepository;
use ak_core::services::account::AccountService;
use ak_shared::config::SessionConfig;

use crate::dto::MessageResponse;
use crate::error::ErrorBody;
use crate::middleware::{create_cors, SessionAuthenticator, SessionGuard};
use crate::routes::account::{
    forgot_password, login, logout, me, register, reset_password, verify_otp,
};

/// Create and configure the application with all dependencies
pub fn create_app<R: AccountRepository + 'static>(
    service: Arc<AccountService<R>>,
    session_config: SessionConfig,
    client_url: &str,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    // The guard depends on the object-safe authenticator slice of the
    // service, registered separately from the concrete service.
    let authenticator: Arc<dyn SessionAuthenticator> = service.clone();

    let cors = create_cors(client_url);

    App::new()
        .app_data(web::Data::from(service))
        .app_data(web::Data::new(authenticator))
        .app_data(web::Data::new(session_config))
        .app_data(json_error_config())
        .wrap(TracingLogger::default())
        .wrap(cors)
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1/user")
                .route("/register", web::post().to(register::<R>))
                .route("/otp-verification", web::post().to(verify_otp::<R>))
                .route("/login", web::post().to(login::<R>))
                .route("/logout", web::post().to(logout).wrap(SessionGuard))
                .route("/me", web::get().to(me).wrap(SessionGuard))
                .route("/password/forgot", web::post().to(forgot_password::<R>))
                .route(
                    "/password/reset/{token}",
                    web::put().to(reset_password::<R>),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// JSON extractor configuration keeping malformed-body errors in the
/// uniform response shape.
fn json_error_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorBody {
            success: false,
            message: err.to_string(),
        });
        actix_web::error::InternalError::from_response(err, response).into()
    })
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(MessageResponse {
        success: false,
        message: "Resource not found".to_string(),
    })
}
