//! Unit tests for session and reset token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::entities::session::Claims;
use crate::errors::{DomainError, TokenError};
use crate::services::token::{TokenConfig, TokenService};

fn create_test_service() -> TokenService {
    TokenService::new(TokenConfig::with_secret("unit-test-secret"))
}

#[test]
fn test_issue_and_verify_session() {
    let service = create_test_service();
    let account_id = Uuid::new_v4();

    let session = service.issue_session(account_id).unwrap();
    assert!(!session.token.is_empty());

    let claims = service.verify_session(&session.token).unwrap();
    assert_eq!(claims.sub, account_id.to_string());
    assert_eq!(claims.account_id().unwrap(), account_id);
}

#[test]
fn test_session_expiry_is_seven_days_out() {
    let service = create_test_service();

    let session = service.issue_session(Uuid::new_v4()).unwrap();
    let expected = Utc::now() + Duration::days(7);
    let drift = (session.expires_at - expected).num_seconds().abs();

    assert!(drift < 60, "expiry drifted {drift}s from the expected window");
}

#[test]
fn test_session_account_id_round_trips() {
    let service = create_test_service();
    let account_id = Uuid::new_v4();

    let session = service.issue_session(account_id).unwrap();
    assert_eq!(service.session_account_id(&session.token).unwrap(), account_id);
}

#[test]
fn test_verify_rejects_garbage() {
    let service = create_test_service();

    let result = service.verify_session("not-a-jwt");
    assert_eq!(result.unwrap_err(), DomainError::Token(TokenError::Invalid));
}

#[test]
fn test_verify_rejects_wrong_secret() {
    let issuer = TokenService::new(TokenConfig::with_secret("secret-a"));
    let verifier = TokenService::new(TokenConfig::with_secret("secret-b"));

    let session = issuer.issue_session(Uuid::new_v4()).unwrap();
    let result = verifier.verify_session(&session.token);

    assert_eq!(result.unwrap_err(), DomainError::Token(TokenError::Invalid));
}

#[test]
fn test_verify_rejects_expired_session() {
    let service = create_test_service();

    // Expired well beyond the default decode leeway.
    let now = Utc::now();
    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        iat: (now - Duration::hours(3)).timestamp(),
        exp: (now - Duration::hours(2)).timestamp(),
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(b"unit-test-secret"),
    )
    .unwrap();

    let result = service.verify_session(&token);
    assert_eq!(result.unwrap_err(), DomainError::Token(TokenError::Expired));
}

#[test]
fn test_verify_rejects_non_uuid_subject() {
    let service = create_test_service();

    let now = Utc::now();
    let claims = Claims {
        sub: "alice".to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(1)).timestamp(),
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(b"unit-test-secret"),
    )
    .unwrap();

    // Claims decode fine but the subject cannot name an account.
    assert!(service.verify_session(&token).is_ok());
    assert_eq!(
        service.session_account_id(&token).unwrap_err(),
        DomainError::Token(TokenError::Invalid)
    );
}

#[test]
fn test_reset_token_shape_and_hash() {
    let service = create_test_service();

    let reset = service.generate_reset_token();
    assert_eq!(reset.token.len(), 40);
    assert!(reset.token.chars().all(|c| c.is_ascii_hexdigit()));

    let mut hasher = Sha256::new();
    hasher.update(reset.token.as_bytes());
    let expected = format!("{:x}", hasher.finalize());

    assert_eq!(reset.token_hash, expected);
    assert_ne!(reset.token, reset.token_hash);
}

#[test]
fn test_reset_tokens_are_unique() {
    let service = create_test_service();

    let first = service.generate_reset_token();
    let second = service.generate_reset_token();

    assert_ne!(first.token, second.token);
    assert_ne!(first.token_hash, second.token_hash);
}
