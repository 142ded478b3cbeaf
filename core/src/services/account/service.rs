//! Account lifecycle service implementation

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ak_shared::utils::phone::{is_valid_phone, mask_phone_number};

use crate::domain::entities::account::Account;
use crate::domain::value_objects::{AuthOutcome, SessionToken};
use crate::errors::{AccountError, DomainError, DomainResult};
use crate::repositories::AccountRepository;
use crate::services::notification::{
    reset_password_email, verification_email, NotificationGateway,
};
use crate::services::token::TokenService;

use super::config::AccountServiceConfig;
use super::password::{hash_password, verify_password};

/// Channel used to deliver the verification code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationMethod {
    /// HTML email carrying the code
    Email,
    /// Voice call reading the code aloud
    Phone,
}

/// Input for [`AccountService::register`].
#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub method: VerificationMethod,
}

/// Outcome of a successful registration.
///
/// The session accompanies the response as a cookie; the message tells the
/// caller where their code went.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Session token for the still-unverified account
    pub session: SessionToken,
    /// Human-readable delivery confirmation
    pub message: String,
}

/// Account service driving registration, verification, login and password
/// reset.
///
/// Generic over the repository; the notification gateway is held as a trait
/// object so transports can be swapped at composition time.
pub struct AccountService<R: AccountRepository> {
    /// Repository for account persistence
    repository: Arc<R>,
    /// Outbound notification gateway
    notifier: Arc<dyn NotificationGateway>,
    /// Token service for session JWTs and reset tokens
    token_service: Arc<TokenService>,
    /// Service configuration
    config: AccountServiceConfig,
}

impl<R: AccountRepository> AccountService<R> {
    /// Create a new account service
    ///
    /// # Arguments
    ///
    /// * `repository` - Repository for account persistence
    /// * `notifier` - Gateway for email and voice delivery
    /// * `token_service` - Service for session and reset tokens
    /// * `config` - Service configuration
    pub fn new(
        repository: Arc<R>,
        notifier: Arc<dyn NotificationGateway>,
        token_service: Arc<TokenService>,
        config: AccountServiceConfig,
    ) -> Self {
        Self {
            repository,
            notifier,
            token_service,
            config,
        }
    }

    /// Register a new account and dispatch its verification code
    ///
    /// This method:
    /// 1. Validates that every field is present and the phone format is valid
    /// 2. Rejects identities already owned by a verified account
    /// 3. Applies the pending-registration attempt limit
    /// 4. Persists the unverified account with a fresh 5-digit code
    /// 5. Issues a session token for the response cookie
    /// 6. Dispatches the code over the chosen channel
    ///
    /// A delivery failure surfaces as an error but leaves the account row in
    /// place; registering again is the retry path, bounded by the attempt
    /// limit.
    ///
    /// # Returns
    ///
    /// * `Ok(Registration)` - Session token plus a delivery confirmation
    /// * `Err(DomainError)` - Validation, conflict, limit, or delivery failure
    pub async fn register(&self, input: NewRegistration) -> DomainResult<Registration> {
        if input.name.trim().is_empty()
            || input.email.trim().is_empty()
            || input.phone.trim().is_empty()
            || input.password.is_empty()
        {
            return Err(DomainError::validation("All fields are required"));
        }

        if !is_valid_phone(&input.phone) {
            return Err(AccountError::InvalidPhoneFormat.into());
        }

        // A verified account owns its identity outright.
        if self
            .repository
            .find_verified_by_email_or_phone(&input.email, &input.phone)
            .await?
            .is_some()
        {
            return Err(AccountError::AlreadyRegistered.into());
        }

        // Bound repeated registrations; the reaper frees the identity again
        // once stale rows age out.
        let pending = self
            .repository
            .count_unverified_by_email_or_phone(&input.email, &input.phone)
            .await?;
        if pending > self.config.max_registration_attempts {
            tracing::warn!(
                phone = %mask_phone_number(&input.phone),
                pending,
                "registration attempt limit reached"
            );
            return Err(AccountError::TooManyAttempts.into());
        }

        let method = input.method;
        let password_hash = hash_password(&input.password)?;
        let mut account = Account::new(input.name, input.email, input.phone, password_hash);
        let code = account.issue_verification_code();

        let account = self.repository.create(account).await?;
        tracing::info!(
            account_id = %account.id,
            phone = %mask_phone_number(&account.phone),
            "unverified account created"
        );

        let session = self.token_service.issue_session(account.id)?;
        let message = self.dispatch_verification_code(&account, method, code).await?;

        Ok(Registration { session, message })
    }

    /// Sends the verification code over the selected channel and returns the
    /// delivery confirmation message.
    async fn dispatch_verification_code(
        &self,
        account: &Account,
        method: VerificationMethod,
        code: u32,
    ) -> DomainResult<String> {
        let code = code.to_string();

        match method {
            VerificationMethod::Email => {
                self.notifier
                    .send_email(verification_email(&account.email, &code))
                    .await
                    .map_err(|e| {
                        tracing::error!(account_id = %account.id, error = %e, "verification email failed");
                        DomainError::Delivery {
                            message: e.to_string(),
                        }
                    })?;
                Ok(format!("Verification Code Sent to {}", account.name))
            }
            VerificationMethod::Phone => {
                self.notifier
                    .send_voice_code(&account.phone, &code)
                    .await
                    .map_err(|e| {
                        tracing::error!(account_id = %account.id, error = %e, "verification call failed");
                        DomainError::Delivery {
                            message: e.to_string(),
                        }
                    })?;
                Ok(format!("OTP Sent to {}", account.phone))
            }
        }
    }

    /// Verify a pending account with its OTP
    ///
    /// Repeated registrations leave multiple unverified rows for the same
    /// identity. The newest row is authoritative: the others are deleted
    /// first, then the code is checked against the survivor. Expiry is
    /// checked only after the code matches, so a wrong code is always
    /// "Invalid OTP" and a right-but-stale one is "OTP Expired".
    ///
    /// # Returns
    ///
    /// * `Ok(AuthOutcome)` - Session token plus the verified profile
    /// * `Err(DomainError)` - Validation, not-found, bad code, or expired code
    pub async fn verify_otp(
        &self,
        email: &str,
        otp: &str,
        phone: &str,
    ) -> DomainResult<AuthOutcome> {
        if !is_valid_phone(phone) {
            return Err(AccountError::InvalidPhoneFormat.into());
        }

        let mut entries = self
            .repository
            .find_unverified_by_email_or_phone(email, phone)
            .await?;

        if entries.is_empty() {
            return Err(AccountError::AccountNotFound.into());
        }

        // Newest row wins; losers go before the winner is touched so a
        // racing duplicate observes not-found.
        let mut account = entries.remove(0);
        if !entries.is_empty() {
            let removed = self
                .repository
                .delete_unverified_except(account.id, email, phone)
                .await?;
            tracing::debug!(
                account_id = %account.id,
                removed,
                "pruned duplicate unverified registrations"
            );
        }

        // The OTP arrives as a string; anything non-numeric is a bad code.
        let presented: u32 = match otp.trim().parse() {
            Ok(value) => value,
            Err(_) => return Err(AccountError::InvalidOtp.into()),
        };

        if account.verification_code != Some(presented) {
            return Err(AccountError::InvalidOtp.into());
        }

        // Expiry is checked only after the code matches.
        if account.verification_code_expired() {
            return Err(AccountError::OtpExpired.into());
        }

        account.mark_verified();
        let account = self.repository.update(account).await?;
        tracing::info!(account_id = %account.id, "account verified");

        let session = self.token_service.issue_session(account.id)?;
        Ok(AuthOutcome::new(session, account.profile()))
    }

    /// Log in with email and password
    ///
    /// Only verified accounts are eligible. An unknown email and a wrong
    /// password produce the identical error.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthOutcome> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(DomainError::validation("Email and password are required"));
        }

        let account = match self.repository.find_verified_by_email(email).await? {
            Some(account) => account,
            None => return Err(AccountError::InvalidCredentials.into()),
        };

        if !verify_password(password, &account.password_hash)? {
            return Err(AccountError::InvalidCredentials.into());
        }

        tracing::info!(account_id = %account.id, "login succeeded");
        let session = self.token_service.issue_session(account.id)?;
        Ok(AuthOutcome::new(session, account.profile()))
    }

    /// Start a password reset by emailing a single-use link
    ///
    /// The raw token only ever leaves through the email; the account stores
    /// its sha256 digest with a 15-minute expiry. If the email cannot be
    /// delivered the reset fields are rolled back before the error surfaces.
    pub async fn forgot_password(&self, email: &str) -> DomainResult<()> {
        let mut account = match self.repository.find_verified_by_email(email).await? {
            Some(account) => account,
            None => return Err(AccountError::AccountNotFound.into()),
        };

        let reset = self.token_service.generate_reset_token();
        account.set_reset_password_token(reset.token_hash);
        let mut account = self.repository.update(account).await?;

        let url = self.config.reset_password_url(&reset.token);
        if let Err(e) = self
            .notifier
            .send_email(reset_password_email(&account.email, &url))
            .await
        {
            tracing::error!(account_id = %account.id, error = %e, "reset email failed");
            // Roll the reset fields back before surfacing the error.
            account.clear_reset_password_token();
            self.repository.update(account).await?;
            return Err(DomainError::Delivery {
                message: e.to_string(),
            });
        }

        tracing::info!(account_id = %account.id, "reset link sent");
        Ok(())
    }

    /// Complete a password reset with the emailed token
    ///
    /// Token expiry is enforced by the lookup, so an expired token and an
    /// unknown one are indistinguishable. Success clears the reset fields
    /// (single use) and signs the account in.
    pub async fn reset_password(
        &self,
        token: &str,
        password: &str,
        confirm_password: &str,
    ) -> DomainResult<AuthOutcome> {
        let token_hash = self.token_service.hash_reset_token(token);
        let mut account = match self.repository.find_by_reset_token_hash(&token_hash).await? {
            Some(account) => account,
            None => return Err(AccountError::InvalidResetToken.into()),
        };

        if password.is_empty() || confirm_password.is_empty() {
            return Err(DomainError::validation(
                "Password and confirm password are required",
            ));
        }
        if password != confirm_password {
            return Err(AccountError::PasswordMismatch.into());
        }

        account.set_password(hash_password(password)?);
        account.clear_reset_password_token();
        let account = self.repository.update(account).await?;
        tracing::info!(account_id = %account.id, "password reset completed");

        let session = self.token_service.issue_session(account.id)?;
        Ok(AuthOutcome::new(session, account.profile()))
    }

    /// Resolve a session token to its account
    ///
    /// Backs the HTTP session guard. A valid token whose account has been
    /// deleted resolves to not-found rather than an authentication error.
    pub async fn authenticate_session(&self, token: &str) -> DomainResult<Account> {
        let account_id = self.token_service.session_account_id(token)?;
        self.load_account(account_id).await
    }

    async fn load_account(&self, account_id: Uuid) -> DomainResult<Account> {
        match self.repository.find_by_id(account_id).await? {
            Some(account) => Ok(account),
            None => Err(AccountError::AccountNotFound.into()),
        }
    }
}
