use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Account unique identifier, assigned by the credential store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AccountId(pub i64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Stored account record.
///
/// Owned by the credential store. The password hash never leaves the auth
/// layer: callers receive an [`AccountSummary`] or a [`Principal`] instead.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub password_hash: String,
    pub is_active: bool,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("is_active", &self.is_active)
            .finish()
    }
}

/// Public view of a newly created account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    pub id: AccountId,
    pub username: String,
    pub is_active: bool,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            is_active: account.is_active,
        }
    }
}

/// Authenticated identity attached to a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub id: AccountId,
    pub username: String,
    pub is_active: bool,
}

impl From<&Account> for Principal {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            is_active: account.is_active,
        }
    }
}

/// Error for credential store operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Username already exists: {0}")]
    UniquenessViolation(String),

    #[error("Credential store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence operations for accounts.
///
/// Each call must be atomic at the storage layer. Username uniqueness is
/// enforced by [`CredentialStore::insert_account`] itself; a lookup before
/// inserting is only a fast path.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve an account by its exact (case-sensitive) username.
    ///
    /// # Errors
    /// * `Unavailable` - Storage operation failed
    async fn find_account_by_username(&self, username: &str)
        -> Result<Option<Account>, StoreError>;

    /// Insert a new active account.
    ///
    /// # Errors
    /// * `UniquenessViolation` - Username is already taken
    /// * `Unavailable` - Storage operation failed
    async fn insert_account(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<Account, StoreError>;

    /// Retrieve an account by identifier.
    ///
    /// # Errors
    /// * `Unavailable` - Storage operation failed
    async fn find_account_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError>;
}
