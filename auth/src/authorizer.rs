use std::sync::Arc;

use crate::errors::AuthError;
use crate::jwt::TokenCodec;
use crate::store::CredentialStore;
use crate::store::Principal;

/// Extract the token from an `Authorization` header value.
///
/// Accepts `Bearer <token>` with the scheme matched case-insensitively.
/// Returns `None` for any other scheme or an empty token.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(' ')?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

/// Gate for protected requests.
///
/// Turns a bearer token into a [`Principal`] or a rejection. Each call reads
/// the account afresh and mutates nothing, so it is safe to run on every
/// request and repeated calls with the same token agree.
pub struct RequestAuthorizer {
    store: Arc<dyn CredentialStore>,
    codec: Arc<TokenCodec>,
}

impl RequestAuthorizer {
    pub fn new(store: Arc<dyn CredentialStore>, codec: Arc<TokenCodec>) -> Self {
        Self { store, codec }
    }

    /// Authorize a request carrying `token`.
    ///
    /// # Errors
    /// * `MalformedToken`, `InvalidSignature`, `TokenExpired` - Token rejected by the codec
    /// * `InvalidCredentials` - Token subject no longer resolves to an account
    /// * `InactiveAccount` - Account exists but is deactivated
    /// * `Internal` - Storage failed
    pub async fn authorize(&self, token: &str) -> Result<Principal, AuthError> {
        let claims = self.codec.decode(token).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            AuthError::from(e)
        })?;

        let account = self
            .store
            .find_account_by_username(&claims.sub)
            .await?
            .ok_or_else(|| {
                tracing::warn!(subject = %claims.sub, "Token subject has no account");
                AuthError::InvalidCredentials
            })?;

        if !account.is_active {
            tracing::debug!(account_id = %account.id, "Inactive account rejected");
            return Err(AuthError::InactiveAccount);
        }

        Ok(Principal::from(&account))
    }
}
