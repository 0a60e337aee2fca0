use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Account;
use auth::AccountId;
use auth::Authenticator;
use auth::CredentialStore;
use auth::HashingPool;
use auth::RequestAuthorizer;
use auth::StoreError;
use auth::TokenCodec;

pub const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Credential store keeping accounts in memory.
///
/// Insert checks and writes under one lock, mirroring a unique constraint.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    accounts: Mutex<HashMap<String, Account>>,
}

impl InMemoryCredentialStore {
    /// Flip the active flag of an account, as an administrator would.
    pub fn set_active(&self, username: &str, is_active: bool) {
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(account) = accounts.get_mut(username) {
            account.is_active = is_active;
        }
    }

    /// Remove an account outright.
    pub fn remove(&self, username: &str) {
        self.accounts.lock().unwrap().remove(username);
    }

    pub fn len(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }

    pub fn stored_hash(&self, username: &str) -> Option<String> {
        self.accounts
            .lock()
            .unwrap()
            .get(username)
            .map(|account| account.password_hash.clone())
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_account_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.lock().unwrap().get(username).cloned())
    }

    async fn insert_account(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(username) {
            return Err(StoreError::UniquenessViolation(username.to_string()));
        }

        let account = Account {
            id: AccountId(accounts.len() as i64 + 1),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            is_active: true,
        };
        accounts.insert(username.to_string(), account.clone());

        Ok(account)
    }

    async fn find_account_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .values()
            .find(|account| account.id == id)
            .cloned())
    }
}

/// Authenticator and authorizer wired to one in-memory store.
pub struct TestAuth {
    pub store: Arc<InMemoryCredentialStore>,
    pub codec: Arc<TokenCodec>,
    pub authenticator: Authenticator,
    pub authorizer: RequestAuthorizer,
}

impl TestAuth {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryCredentialStore::default());
        let codec = Arc::new(TokenCodec::new(SECRET));

        let authenticator = Authenticator::new(
            Arc::clone(&store) as Arc<dyn CredentialStore>,
            Arc::clone(&codec),
            HashingPool::new(4),
        );
        let authorizer = RequestAuthorizer::new(
            Arc::clone(&store) as Arc<dyn CredentialStore>,
            Arc::clone(&codec),
        );

        Self {
            store,
            codec,
            authenticator,
            authorizer,
        }
    }
}
