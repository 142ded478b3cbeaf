//! Request and response bodies for the HTTP surface.

pub mod account;

pub use account::{
    ForgotPasswordRequest, LoginRequest, MessageResponse, ProfileResponse, RegisterRequest,
    ResetPasswordRequest, SessionResponse, VerifyOtpRequest,
};
