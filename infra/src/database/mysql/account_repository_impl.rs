//! MySQL implementation of the AccountRepository trait.
//!
//! This module provides the concrete implementation of account persistence
//! using MySQL with SQLx. Uniqueness among verified identities is enforced
//! by the schema (generated-column unique keys), so duplicate-key failures
//! surface here as the conflict error.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ak_core::domain::entities::account::Account;
use ak_core::errors::{AccountError, DomainError};
use ak_core::repositories::AccountRepository;

/// MySQL implementation of AccountRepository
pub struct MySqlAccountRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    /// Create a new MySQL account repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Translate a store error into a domain error
    ///
    /// Duplicate-key violations mean a verified identity already exists;
    /// everything else is internal.
    fn map_store_error(context: &str, e: sqlx::Error) -> DomainError {
        if let sqlx::Error::Database(ref db) = e {
            if db.is_unique_violation() {
                return AccountError::AlreadyRegistered.into();
            }
        }
        DomainError::Internal {
            message: format!("{}: {}", context, e),
        }
    }

    /// Convert a database row to an Account entity
    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;

        Ok(Account {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid UUID in accounts.id: {}", e),
            })?,
            name: row.try_get("name").map_err(|e| DomainError::Internal {
                message: format!("Failed to get name: {}", e),
            })?,
            email: row.try_get("email").map_err(|e| DomainError::Internal {
                message: format!("Failed to get email: {}", e),
            })?,
            phone: row.try_get("phone").map_err(|e| DomainError::Internal {
                message: format!("Failed to get phone: {}", e),
            })?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get password_hash: {}", e),
                })?,
            account_verified: row
                .try_get("account_verified")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get account_verified: {}", e),
                })?,
            verification_code: row
                .try_get::<Option<u32>, _>("verification_code")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get verification_code: {}", e),
                })?,
            verification_code_expires_at: row
                .try_get::<Option<DateTime<Utc>>, _>("verification_code_expires_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get verification_code_expires_at: {}", e),
                })?,
            reset_password_token_hash: row
                .try_get::<Option<String>, _>("reset_password_token_hash")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get reset_password_token_hash: {}", e),
                })?,
            reset_password_expires_at: row
                .try_get::<Option<DateTime<Utc>>, _>("reset_password_expires_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get reset_password_expires_at: {}", e),
                })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            INSERT INTO accounts (
                id, name, email, phone, password_hash,
                account_verified, verification_code, verification_code_expires_at,
                reset_password_token_hash, reset_password_expires_at, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(account.id.to_string())
            .bind(&account.name)
            .bind(&account.email)
            .bind(&account.phone)
            .bind(&account.password_hash)
            .bind(account.account_verified)
            .bind(account.verification_code)
            .bind(account.verification_code_expires_at)
            .bind(&account.reset_password_token_hash)
            .bind(account.reset_password_expires_at)
            .bind(account.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::map_store_error("Failed to create account", e))?;

        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            UPDATE accounts SET
                name = ?,
                email = ?,
                phone = ?,
                password_hash = ?,
                account_verified = ?,
                verification_code = ?,
                verification_code_expires_at = ?,
                reset_password_token_hash = ?,
                reset_password_expires_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&account.name)
            .bind(&account.email)
            .bind(&account.phone)
            .bind(&account.password_hash)
            .bind(account.account_verified)
            .bind(account.verification_code)
            .bind(account.verification_code_expires_at)
            .bind(&account.reset_password_token_hash)
            .bind(account.reset_password_expires_at)
            .bind(account.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::map_store_error("Failed to update account", e))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::AccountNotFound.into());
        }

        Ok(account)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let query = r#"
            SELECT id, name, email, phone, password_hash,
                   account_verified, verification_code, verification_code_expires_at,
                   reset_password_token_hash, reset_password_expires_at, created_at
            FROM accounts
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::map_store_error("Failed to find account by id", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_verified_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let query = r#"
            SELECT id, name, email, phone, password_hash,
                   account_verified, verification_code, verification_code_expires_at,
                   reset_password_token_hash, reset_password_expires_at, created_at
            FROM accounts
            WHERE email = ? AND account_verified = TRUE
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::map_store_error("Failed to find verified account", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_verified_by_email_or_phone(
        &self,
        email: &str,
        phone: &str,
    ) -> Result<Option<Account>, DomainError> {
        let query = r#"
            SELECT id, name, email, phone, password_hash,
                   account_verified, verification_code, verification_code_expires_at,
                   reset_password_token_hash, reset_password_expires_at, created_at
            FROM accounts
            WHERE account_verified = TRUE AND (email = ? OR phone = ?)
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .bind(phone)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::map_store_error("Failed to find verified account", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_unverified_by_email_or_phone(
        &self,
        email: &str,
        phone: &str,
    ) -> Result<Vec<Account>, DomainError> {
        let query = r#"
            SELECT id, name, email, phone, password_hash,
                   account_verified, verification_code, verification_code_expires_at,
                   reset_password_token_hash, reset_password_expires_at, created_at
            FROM accounts
            WHERE account_verified = FALSE AND (email = ? OR phone = ?)
            ORDER BY created_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(email)
            .bind(phone)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Self::map_store_error("Failed to find unverified accounts", e))?;

        rows.iter().map(Self::row_to_account).collect()
    }

    async fn count_unverified_by_email_or_phone(
        &self,
        email: &str,
        phone: &str,
    ) -> Result<u64, DomainError> {
        let query = r#"
            SELECT COUNT(*) as count
            FROM accounts
            WHERE account_verified = FALSE AND (email = ? OR phone = ?)
        "#;

        let row = sqlx::query(query)
            .bind(email)
            .bind(phone)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Self::map_store_error("Failed to count unverified accounts", e))?;

        let count: i64 = row.try_get("count").map_err(|e| DomainError::Internal {
            message: format!("Failed to get count: {}", e),
        })?;

        Ok(count as u64)
    }

    async fn delete_unverified_except(
        &self,
        keep_id: Uuid,
        email: &str,
        phone: &str,
    ) -> Result<u64, DomainError> {
        let query = r#"
            DELETE FROM accounts
            WHERE account_verified = FALSE
              AND id <> ?
              AND (email = ? OR phone = ?)
        "#;

        let result = sqlx::query(query)
            .bind(keep_id.to_string())
            .bind(email)
            .bind(phone)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::map_store_error("Failed to prune unverified accounts", e))?;

        Ok(result.rows_affected())
    }

    async fn find_by_reset_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<Account>, DomainError> {
        // Expiry is enforced here: an expired token reads as unknown.
        let query = r#"
            SELECT id, name, email, phone, password_hash,
                   account_verified, verification_code, verification_code_expires_at,
                   reset_password_token_hash, reset_password_expires_at, created_at
            FROM accounts
            WHERE reset_password_token_hash = ? AND reset_password_expires_at > ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(token_hash)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::map_store_error("Failed to find account by reset token", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let query = "DELETE FROM accounts WHERE id = ?";

        let result = sqlx::query(query)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::map_store_error("Failed to delete account", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_unverified_older_than(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, DomainError> {
        let query = r#"
            DELETE FROM accounts
            WHERE account_verified = FALSE AND created_at < ?
        "#;

        let result = sqlx::query(query)
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::map_store_error("Failed to delete stale accounts", e))?;

        Ok(result.rows_affected())
    }
}
