//! Account repository trait defining the interface for account persistence.
//!
//! This module defines the repository pattern interface for Account
//! entities. The trait is async-first and uses Result types for proper
//! error handling. Every lookup the lifecycle engine needs is a named
//! query here; callers never pass filter objects.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

/// Repository trait for Account entity persistence operations
///
/// Implementations handle the actual database operations while maintaining
/// the abstraction boundary between domain and infrastructure layers.
///
/// # Example Implementation
/// ```ignore
/// use async_trait::async_trait;
/// use ak_core::repositories::AccountRepository;
/// use ak_core::domain::entities::account::Account;
/// use ak_core::errors::DomainError;
///
/// struct MySqlAccountRepository {
///     // database connection pool
/// }
///
/// #[async_trait]
/// impl AccountRepository for MySqlAccountRepository {
///     async fn create(&self, account: Account) -> Result<Account, DomainError> {
///         // Implementation here
///         Ok(account)
///     }
///
///     // ... other methods
/// }
/// # impl MySqlAccountRepository {}
/// ```
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Persist a new account
    ///
    /// # Returns
    /// * `Ok(Account)` - The created account
    /// * `Err(DomainError)` - Creation failed (e.g., verified duplicate)
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Persist the full state of an existing account
    ///
    /// # Returns
    /// * `Ok(Account)` - The updated account
    /// * `Err(DomainError)` - Update failed (e.g., account not found)
    async fn update(&self, account: Account) -> Result<Account, DomainError>;

    /// Find an account by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Find a verified account by email
    ///
    /// Unverified rows are invisible to this query; login and password
    /// reset only ever see verified accounts.
    async fn find_verified_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Find a verified account matching either the email or the phone
    ///
    /// Used by registration to detect an identity that is already taken.
    async fn find_verified_by_email_or_phone(
        &self,
        email: &str,
        phone: &str,
    ) -> Result<Option<Account>, DomainError>;

    /// Find all unverified accounts matching either the email or the phone,
    /// newest first
    ///
    /// Repeated registrations leave multiple unverified rows; the first
    /// element is the authoritative one.
    ///
    /// # Example
    /// ```no_run
    /// # use ak_core::repositories::AccountRepository;
    /// # async fn example(repo: &impl AccountRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let pending = repo
    ///     .find_unverified_by_email_or_phone("a@example.com", "+911234567890")
    ///     .await?;
    /// if let Some(newest) = pending.first() {
    ///     println!("Authoritative row: {}", newest.id);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn find_unverified_by_email_or_phone(
        &self,
        email: &str,
        phone: &str,
    ) -> Result<Vec<Account>, DomainError>;

    /// Count unverified accounts matching either the email or the phone
    ///
    /// Backs the registration attempt limit.
    async fn count_unverified_by_email_or_phone(
        &self,
        email: &str,
        phone: &str,
    ) -> Result<u64, DomainError>;

    /// Delete every unverified account matching the email or phone except
    /// the one identified by `keep_id`
    ///
    /// # Returns
    /// * `Ok(count)` - Number of rows deleted
    async fn delete_unverified_except(
        &self,
        keep_id: Uuid,
        email: &str,
        phone: &str,
    ) -> Result<u64, DomainError>;

    /// Find the account holding this reset-token hash, provided the token
    /// has not expired
    ///
    /// Expiry is enforced by the query itself; an expired token is
    /// indistinguishable from an unknown one.
    async fn find_by_reset_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<Account>, DomainError>;

    /// Delete an account
    ///
    /// # Returns
    /// * `Ok(true)` - Account was deleted
    /// * `Ok(false)` - Account not found
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Delete unverified accounts created before the cutoff
    ///
    /// Backs the background reaper.
    ///
    /// # Returns
    /// * `Ok(count)` - Number of rows deleted
    async fn delete_unverified_older_than(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, DomainError>;
}
