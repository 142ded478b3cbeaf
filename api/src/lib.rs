//! HTTP layer of the AuthKit backend.
//!
//! Exposes the application factory plus the DTOs, middleware, and error
//! boundary it is built from, so integration tests can drive the full
//! surface in-process.

pub mod app;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod routes;

pub use app::create_app;
pub use error::ApiError;
