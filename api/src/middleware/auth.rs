//! Session guard for protected endpoints.
//!
//! The guard reads the session cookie, resolves it to an account through the
//! account service, and injects the account into the request. Handlers behind
//! the guard take a [`CurrentAccount`] extractor and never touch the token.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use ak_core::domain::entities::account::Account;
use ak_core::errors::{AccountError, DomainError};
use ak_core::repositories::AccountRepository;
use ak_core::services::account::AccountService;
use ak_shared::config::SessionConfig;

use crate::error::ApiError;

/// Cookie name used when no session config is registered
const DEFAULT_COOKIE_NAME: &str = "token";

/// The account resolved from the session cookie, available to guarded
/// handlers as an extractor.
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Account);

/// Session resolution seam between the guard and the account service
///
/// The guard only needs token-to-account resolution, so it depends on this
/// object-safe slice of the service rather than the generic service type.
#[async_trait]
pub trait SessionAuthenticator: Send + Sync {
    async fn resolve_session(&self, token: &str) -> Result<Account, DomainError>;
}

#[async_trait]
impl<R: AccountRepository> SessionAuthenticator for AccountService<R> {
    async fn resolve_session(&self, token: &str) -> Result<Account, DomainError> {
        self.authenticate_session(token).await
    }
}

/// Middleware factory guarding a route behind a valid session cookie
pub struct SessionGuard;

impl<S, B> Transform<S, ServiceRequest> for SessionGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGuardMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Session guard middleware service
pub struct SessionGuardMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let cookie_name = req
                .app_data::<web::Data<SessionConfig>>()
                .map(|config| config.cookie_name.clone())
                .unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string());

            let token = match req.cookie(&cookie_name) {
                Some(cookie) => cookie.value().to_string(),
                None => {
                    return Ok(deny(req, ApiError::from(AccountError::NotAuthenticated)));
                }
            };

            let authenticator = match req.app_data::<web::Data<Arc<dyn SessionAuthenticator>>>() {
                Some(authenticator) => Arc::clone(authenticator.get_ref()),
                None => {
                    let error = ApiError(DomainError::internal(
                        "session authenticator is not registered",
                    ));
                    return Ok(deny(req, error));
                }
            };

            match authenticator.resolve_session(&token).await {
                Ok(account) => {
                    req.extensions_mut().insert(CurrentAccount(account));
                    service
                        .call(req)
                        .await
                        .map(|res| res.map_into_left_body())
                }
                Err(error) => Ok(deny(req, ApiError::from(error))),
            }
        })
    }
}

/// Short-circuits a request with the error's response, keeping the rejection
/// inside the normal response path so outer middleware still runs.
fn deny<B>(req: ServiceRequest, error: ApiError) -> ServiceResponse<EitherBody<B>> {
    let response = error.error_response();
    req.into_response(response).map_into_right_body()
}

impl FromRequest for CurrentAccount {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<CurrentAccount>()
            .cloned()
            .ok_or_else(|| ApiError::from(AccountError::NotAuthenticated).into());

        ready(result)
    }
}
