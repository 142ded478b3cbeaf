//! Session token signing, verification and reset-token generation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::entities::session::Claims;
use crate::domain::value_objects::SessionToken;
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::services::token::config::TokenConfig;

/// Number of random bytes behind a password-reset token (40 hex chars on the wire).
const RESET_TOKEN_BYTES: usize = 20;

/// A freshly generated password-reset token.
///
/// `token` is what the account holder receives; `token_hash` is the only
/// form that gets persisted.
#[derive(Debug, Clone)]
pub struct ResetToken {
    /// Plaintext token embedded in the reset link
    pub token: String,
    /// sha256 hex digest stored against the account
    pub token_hash: String,
}

/// Service for issuing and verifying session tokens.
///
/// Sessions are stateless HS256 JWTs; there is no server-side session
/// store, so verification is purely cryptographic. The same service also
/// mints password-reset tokens, which ARE persisted (hashed) because they
/// must be single-use.
pub struct TokenService {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service from configuration.
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issues a session token for an account.
    ///
    /// # Arguments
    ///
    /// * `account_id` - The account's UUID
    ///
    /// # Returns
    ///
    /// * `Ok(SessionToken)` - Signed token plus its expiry instant
    /// * `Err(DomainError)` - Signing failed
    pub fn issue_session(&self, account_id: Uuid) -> DomainResult<SessionToken> {
        let claims = Claims::new_session(account_id, self.config.session_ttl_days);
        let expires_at = Utc::now() + Duration::days(self.config.session_ttl_days);

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::GenerationFailed))?;

        Ok(SessionToken::new(token, expires_at))
    }

    /// Verifies a session token and returns its claims.
    ///
    /// # Arguments
    ///
    /// * `token` - The JWT from the session cookie
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(DomainError)` - Token is expired, malformed or has a bad signature
    pub fn verify_session(&self, token: &str) -> DomainResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                if e.kind() == &jsonwebtoken::errors::ErrorKind::ExpiredSignature {
                    DomainError::Token(TokenError::Expired)
                } else {
                    DomainError::Token(TokenError::Invalid)
                }
            })?;

        Ok(token_data.claims)
    }

    /// Verifies a session token and returns the account ID it belongs to.
    ///
    /// A token whose subject is not a UUID is treated the same as a forged
    /// one.
    pub fn session_account_id(&self, token: &str) -> DomainResult<Uuid> {
        let claims = self.verify_session(token)?;
        claims
            .account_id()
            .map_err(|_| DomainError::Token(TokenError::Invalid))
    }

    /// Generates a password-reset token and its storage hash.
    pub fn generate_reset_token(&self) -> ResetToken {
        let mut bytes = [0u8; RESET_TOKEN_BYTES];
        rand::thread_rng().fill(&mut bytes);

        let token = hex::encode(bytes);
        let token_hash = self.hash_reset_token(&token);

        ResetToken { token, token_hash }
    }

    /// Hashes a reset token for storage and lookup.
    pub(crate) fn hash_reset_token(&self, token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
