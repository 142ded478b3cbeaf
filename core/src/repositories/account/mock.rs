//! Mock implementation of AccountRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::{AccountError, DomainError};

use super::trait_::AccountRepository;

/// In-memory account repository for tests
///
/// Matching mirrors the SQL implementation: verified/unverified partitions,
/// email-or-phone matching, newest-first ordering, and expiry enforcement
/// on reset-token lookups.
pub struct MockAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl MockAccountRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Fetch a stored account directly, bypassing the trait
    ///
    /// Test seam for asserting on persisted state.
    pub async fn get(&self, id: Uuid) -> Option<Account> {
        self.accounts.read().await.get(&id).cloned()
    }

    /// Overwrite a stored account directly, bypassing the trait
    ///
    /// Test seam for seeding rows and back-dating expiries.
    pub async fn put(&self, account: Account) {
        self.accounts.write().await.insert(account.id, account);
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    /// Whether the store is empty
    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }

    fn matches_identity(account: &Account, email: &str, phone: &str) -> bool {
        account.email == email || account.phone == phone
    }
}

impl Default for MockAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        // Mirror the store's unique keys over verified identities
        if account.account_verified
            && accounts.values().any(|a| {
                a.account_verified && Self::matches_identity(a, &account.email, &account.phone)
            })
        {
            return Err(AccountError::AlreadyRegistered.into());
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if !accounts.contains_key(&account.id) {
            return Err(AccountError::AccountNotFound.into());
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn find_verified_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| a.account_verified && a.email == email)
            .cloned())
    }

    async fn find_verified_by_email_or_phone(
        &self,
        email: &str,
        phone: &str,
    ) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| a.account_verified && Self::matches_identity(a, email, phone))
            .cloned())
    }

    async fn find_unverified_by_email_or_phone(
        &self,
        email: &str,
        phone: &str,
    ) -> Result<Vec<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        let mut matches: Vec<Account> = accounts
            .values()
            .filter(|a| !a.account_verified && Self::matches_identity(a, email, phone))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matches)
    }

    async fn count_unverified_by_email_or_phone(
        &self,
        email: &str,
        phone: &str,
    ) -> Result<u64, DomainError> {
        let accounts = self.accounts.read().await;
        let count = accounts
            .values()
            .filter(|a| !a.account_verified && Self::matches_identity(a, email, phone))
            .count();
        Ok(count as u64)
    }

    async fn delete_unverified_except(
        &self,
        keep_id: Uuid,
        email: &str,
        phone: &str,
    ) -> Result<u64, DomainError> {
        let mut accounts = self.accounts.write().await;
        let doomed: Vec<Uuid> = accounts
            .values()
            .filter(|a| {
                !a.account_verified && a.id != keep_id && Self::matches_identity(a, email, phone)
            })
            .map(|a| a.id)
            .collect();
        for id in &doomed {
            accounts.remove(id);
        }
        Ok(doomed.len() as u64)
    }

    async fn find_by_reset_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<Account>, DomainError> {
        let now = Utc::now();
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| {
                a.reset_password_token_hash.as_deref() == Some(token_hash)
                    && a.reset_password_expires_at.map_or(false, |e| e > now)
            })
            .cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut accounts = self.accounts.write().await;
        Ok(accounts.remove(&id).is_some())
    }

    async fn delete_unverified_older_than(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, DomainError> {
        let mut accounts = self.accounts.write().await;
        let doomed: Vec<Uuid> = accounts
            .values()
            .filter(|a| !a.account_verified && a.created_at < cutoff)
            .map(|a| a.id)
            .collect();
        for id in &doomed {
            accounts.remove(id);
        }
        Ok(doomed.len() as u64)
    }
}
