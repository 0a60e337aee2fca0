use thiserror::Error;

use crate::jwt::TokenError;
use crate::password::PasswordError;
use crate::store::StoreError;

/// Outcome kinds of signup, login and request authorization.
///
/// Everything except `Internal` is an expected, user-facing rejection.
/// `InvalidCredentials` deliberately covers both an unknown username and a
/// wrong password.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Username already exists: {0}")]
    UsernameTaken(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Inactive account")]
    InactiveAccount,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token expired")]
    TokenExpired,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Malformed(_) => AuthError::MalformedToken,
            TokenError::InvalidSignature => AuthError::InvalidSignature,
            TokenError::Expired => AuthError::TokenExpired,
            TokenError::EncodingFailed(msg) => AuthError::Internal(msg),
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniquenessViolation(username) => AuthError::UsernameTaken(username),
            StoreError::Unavailable(msg) => AuthError::Internal(msg),
        }
    }
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
