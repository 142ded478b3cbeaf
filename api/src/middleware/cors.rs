//! CORS configuration for the browser client.
//!
//! The session rides in a cookie, so the browser only sends it cross-origin
//! when the server both names the client origin explicitly and allows
//! credentials. A wildcard origin is rejected by actix-cors in that
//! combination, which is why the origin comes from configuration.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use std::env;

/// Preflight cache lifetime when `CORS_MAX_AGE` is unset
const DEFAULT_MAX_AGE_SECS: usize = 3600;

/// Creates the CORS middleware for the configured client origin.
///
/// # Environment Variables
/// - `CORS_MAX_AGE`: Max age for preflight cache (default: 3600 seconds)
pub fn create_cors(client_url: &str) -> Cors {
    let max_age = env::var("CORS_MAX_AGE")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(DEFAULT_MAX_AGE_SECS);

    tracing::debug!(origin = %client_url, "configuring CORS");

    Cors::default()
        .allowed_origin(client_url)
        .allowed_methods(vec![Method::GET, Method::POST, Method::PUT])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
        ])
        .supports_credentials()
        .max_age(max_age)
}
