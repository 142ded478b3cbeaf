//! HTTP-level tests for the password reset flow.

mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use chrono::{Duration, Utc};

use ak_api::create_app;
use ak_core::repositories::AccountRepository;
use ak_core::services::account::{NewRegistration, VerificationMethod};

use common::{reset_token_from_email, response_cookie, stored_verification_code, TestContext};

const EMAIL: &str = "asha@example.com";
const PHONE: &str = "+911234567890";
const PASSWORD: &str = "secret123";

/// Registers and verifies an account through the service layer so each test
/// drives HTTP only for the operation under scrutiny.
async fn seed_verified_account(ctx: &TestContext) {
    ctx.service
        .register(NewRegistration {
            name: "Asha".to_string(),
            email: EMAIL.to_string(),
            phone: PHONE.to_string(),
            password: PASSWORD.to_string(),
            method: VerificationMethod::Email,
        })
        .await
        .expect("register");
    let code = stored_verification_code(&ctx.repository, EMAIL, PHONE).await;
    ctx.service
        .verify_otp(EMAIL, &code, PHONE)
        .await
        .expect("verify");
}

#[actix_web::test]
async fn test_forgot_password_sends_reset_link() {
    let ctx = TestContext::new();
    seed_verified_account(&ctx).await;
    let app = test::init_service(create_app(
        ctx.service.clone(),
        ctx.session_config.clone(),
        common::CLIENT_URL,
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/user/password/forgot")
        .set_json(serde_json::json!({ "email": EMAIL }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(
        body["message"],
        format!("Reset Password Link Sent to Your Email {}", EMAIL)
    );

    let email = ctx.gateway.last_email().expect("reset email");
    assert_eq!(email.to, EMAIL);
    assert_eq!(email.subject, "Reset Your Password");

    let token = reset_token_from_email(&email.body);
    assert_eq!(token.len(), 40);
    assert!(email
        .body
        .contains(&format!("{}/password/reset/{}", common::CLIENT_URL, token)));

    // Stored at rest as a hash, never the raw token.
    let account = ctx
        .repository
        .find_verified_by_email(EMAIL)
        .await
        .unwrap()
        .expect("verified account");
    let hash = account.reset_password_token_hash.expect("token hash");
    assert_ne!(hash, token);
    assert_eq!(hash.len(), 64);
    assert!(account.reset_password_expires_at.is_some());
}

#[actix_web::test]
async fn test_forgot_password_requires_verified_account() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(
        ctx.service.clone(),
        ctx.session_config.clone(),
        common::CLIENT_URL,
    ))
    .await;

    // Unknown email.
    let req = test::TestRequest::post()
        .uri("/api/v1/user/password/forgot")
        .set_json(serde_json::json!({ "email": "ghost@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Account not found");

    // Pending registrations are invisible to the reset flow.
    ctx.service
        .register(NewRegistration {
            name: "Asha".to_string(),
            email: EMAIL.to_string(),
            phone: PHONE.to_string(),
            password: PASSWORD.to_string(),
            method: VerificationMethod::Email,
        })
        .await
        .expect("register");

    let req = test::TestRequest::post()
        .uri("/api/v1/user/password/forgot")
        .set_json(serde_json::json!({ "email": EMAIL }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_forgot_password_delivery_failure_rolls_back() {
    let ctx = TestContext::new();
    seed_verified_account(&ctx).await;
    ctx.gateway.set_fail(true);
    let app = test::init_service(create_app(
        ctx.service.clone(),
        ctx.session_config.clone(),
        common::CLIENT_URL,
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/user/password/forgot")
        .set_json(serde_json::json!({ "email": EMAIL }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // The undeliverable token would be unusable; the row is wiped clean.
    let account = ctx
        .repository
        .find_verified_by_email(EMAIL)
        .await
        .unwrap()
        .expect("verified account");
    assert!(account.reset_password_token_hash.is_none());
    assert!(account.reset_password_expires_at.is_none());
}

#[actix_web::test]
async fn test_reset_password_round_trip_and_single_use() {
    let ctx = TestContext::new();
    seed_verified_account(&ctx).await;
    let app = test::init_service(create_app(
        ctx.service.clone(),
        ctx.session_config.clone(),
        common::CLIENT_URL,
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/user/password/forgot")
        .set_json(serde_json::json!({ "email": EMAIL }))
        .to_request();
    test::call_service(&app, req).await;
    let token = reset_token_from_email(&ctx.gateway.last_email().expect("reset email").body);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/user/password/reset/{}", token))
        .set_json(serde_json::json!({
            "password": "brand-new-pass",
            "confirmPassword": "brand-new-pass",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(response_cookie(&resp, "token").is_some());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Password Reset Successfully");
    assert_eq!(body["user"]["email"], EMAIL);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

    // The token is spent.
    let account = ctx
        .repository
        .find_verified_by_email(EMAIL)
        .await
        .unwrap()
        .expect("verified account");
    assert!(account.reset_password_token_hash.is_none());
    assert!(account.reset_password_expires_at.is_none());

    // Old credentials are gone, new ones work.
    let req = test::TestRequest::post()
        .uri("/api/v1/user/login")
        .set_json(serde_json::json!({ "email": EMAIL, "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/v1/user/login")
        .set_json(serde_json::json!({ "email": EMAIL, "password": "brand-new-pass" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Replaying the spent token is refused.
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/user/password/reset/{}", token))
        .set_json(serde_json::json!({
            "password": "another-pass",
            "confirmPassword": "another-pass",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid or expired reset password token");
}

#[actix_web::test]
async fn test_reset_password_expired_token() {
    let ctx = TestContext::new();
    seed_verified_account(&ctx).await;
    let app = test::init_service(create_app(
        ctx.service.clone(),
        ctx.session_config.clone(),
        common::CLIENT_URL,
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/user/password/forgot")
        .set_json(serde_json::json!({ "email": EMAIL }))
        .to_request();
    test::call_service(&app, req).await;
    let token = reset_token_from_email(&ctx.gateway.last_email().expect("reset email").body);

    let mut account = ctx
        .repository
        .find_verified_by_email(EMAIL)
        .await
        .unwrap()
        .expect("verified account");
    account.reset_password_expires_at = Some(Utc::now() - Duration::minutes(1));
    ctx.repository.put(account).await;

    // An expired token reads exactly like an unknown one.
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/user/password/reset/{}", token))
        .set_json(serde_json::json!({
            "password": "brand-new-pass",
            "confirmPassword": "brand-new-pass",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid or expired reset password token");
}

#[actix_web::test]
async fn test_reset_password_mismatch_keeps_token_live() {
    let ctx = TestContext::new();
    seed_verified_account(&ctx).await;
    let app = test::init_service(create_app(
        ctx.service.clone(),
        ctx.session_config.clone(),
        common::CLIENT_URL,
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/user/password/forgot")
        .set_json(serde_json::json!({ "email": EMAIL }))
        .to_request();
    test::call_service(&app, req).await;
    let token = reset_token_from_email(&ctx.gateway.last_email().expect("reset email").body);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/user/password/reset/{}", token))
        .set_json(serde_json::json!({
            "password": "brand-new-pass",
            "confirmPassword": "different-pass",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Password and confirm password do not match");

    // A failed confirmation does not burn the token.
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/user/password/reset/{}", token))
        .set_json(serde_json::json!({
            "password": "brand-new-pass",
            "confirmPassword": "brand-new-pass",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_reset_password_missing_fields() {
    let ctx = TestContext::new();
    seed_verified_account(&ctx).await;
    let app = test::init_service(create_app(
        ctx.service.clone(),
        ctx.session_config.clone(),
        common::CLIENT_URL,
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/user/password/forgot")
        .set_json(serde_json::json!({ "email": EMAIL }))
        .to_request();
    test::call_service(&app, req).await;
    let token = reset_token_from_email(&ctx.gateway.last_email().expect("reset email").body);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/user/password/reset/{}", token))
        .set_json(serde_json::json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Password and confirm password are required");
}

#[actix_web::test]
async fn test_reset_password_unknown_token_wins_over_missing_fields() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(
        ctx.service.clone(),
        ctx.session_config.clone(),
        common::CLIENT_URL,
    ))
    .await;

    // Token validity is checked before the body, so a bad token with an
    // empty body still reads as a token problem.
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/user/password/reset/{}", "ab".repeat(20)))
        .set_json(serde_json::json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid or expired reset password token");
}
