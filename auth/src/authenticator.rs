use std::sync::Arc;

use chrono::Duration;
use tokio::sync::OnceCell;

use crate::errors::AuthError;
use crate::jwt::TokenCodec;
use crate::password::HashingPool;
use crate::store::AccountSummary;
use crate::store::CredentialStore;
use crate::store::StoreError;

const DUMMY_PASSWORD: &str = "timing-parity-placeholder";

/// Signup and login coordinator.
///
/// Combines the credential store, the password hashing pool and the token
/// codec. Holds no account state of its own; every call reads through the
/// store.
pub struct Authenticator {
    store: Arc<dyn CredentialStore>,
    hashing: HashingPool,
    codec: Arc<TokenCodec>,
    dummy_digest: OnceCell<String>,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `store` - Credential store holding accounts
    /// * `codec` - Token codec used to issue access tokens
    /// * `hashing` - Pool running Argon2 off the async runtime
    pub fn new(
        store: Arc<dyn CredentialStore>,
        codec: Arc<TokenCodec>,
        hashing: HashingPool,
    ) -> Self {
        Self {
            store,
            hashing,
            codec,
            dummy_digest: OnceCell::new(),
        }
    }

    /// Lifetime of the tokens issued by [`Authenticator::login`].
    pub fn token_ttl(&self) -> Duration {
        self.codec.default_ttl()
    }

    /// Compute the digest used for unknown-username logins ahead of time.
    ///
    /// Optional: without it the first such login pays for one extra hash.
    pub async fn prime(&self) -> Result<(), AuthError> {
        self.dummy_digest().await?;
        Ok(())
    }

    /// Register a new account.
    ///
    /// # Returns
    /// Summary of the created account, without the password hash
    ///
    /// # Errors
    /// * `UsernameTaken` - An account with this exact username exists
    /// * `Internal` - Hashing or storage failed
    pub async fn signup(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AccountSummary, AuthError> {
        if self.store.find_account_by_username(username).await?.is_some() {
            tracing::debug!(username = %username, "Signup rejected: username taken");
            return Err(AuthError::UsernameTaken(username.to_string()));
        }

        let password_hash = self.hashing.hash(password.to_string()).await?;

        // The store's uniqueness constraint settles concurrent signups that
        // both passed the lookup above.
        let account = self
            .store
            .insert_account(username, &password_hash)
            .await
            .map_err(|e| {
                if let StoreError::UniquenessViolation(_) = &e {
                    tracing::debug!(username = %username, "Signup lost race on username");
                }
                AuthError::from(e)
            })?;

        tracing::info!(
            account_id = %account.id,
            username = %account.username,
            "Account created"
        );

        Ok(AccountSummary::from(&account))
    }

    /// Verify credentials and issue an access token.
    ///
    /// An unknown username still costs one password verification, so both
    /// rejection paths take comparable time and return the same error.
    ///
    /// # Returns
    /// Signed access token with the default TTL
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `Internal` - Hashing, storage or signing failed
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let account = self.store.find_account_by_username(username).await?;

        let (digest, account) = match account {
            Some(account) => (account.password_hash.clone(), Some(account)),
            None => (self.dummy_digest().await?.clone(), None),
        };

        let is_valid = self.hashing.verify(password.to_string(), digest).await?;

        let account = match account {
            Some(account) if is_valid => account,
            _ => {
                tracing::debug!("Login rejected: invalid credentials");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let token = self.codec.issue(&account.username)?;
        tracing::debug!(account_id = %account.id, "Access token issued");

        Ok(token)
    }

    async fn dummy_digest(&self) -> Result<&String, AuthError> {
        let digest = self
            .dummy_digest
            .get_or_try_init(|| self.hashing.hash(DUMMY_PASSWORD.to_string()))
            .await?;
        Ok(digest)
    }
}
