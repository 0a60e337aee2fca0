//! Authentication core for the posts service
//!
//! Provides:
//! - Password hashing (Argon2id), run on a bounded blocking pool
//! - Access token issuance and validation (HS256 JWT)
//! - Signup and login over a pluggable credential store
//! - Bearer-token request authorization
//!
//! The credential store is a port: services implement [`CredentialStore`] on
//! top of whatever storage they use.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::TokenCodec;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let token = codec.issue("alice").unwrap();
//! let claims = codec.decode(&token).unwrap();
//! assert_eq!(claims.sub, "alice");
//! ```

pub mod authenticator;
pub mod authorizer;
pub mod errors;
pub mod jwt;
pub mod password;
pub mod store;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use authorizer::bearer_token;
pub use authorizer::RequestAuthorizer;
pub use errors::AuthError;
pub use jwt::Claims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use password::HashingPool;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use store::Account;
pub use store::AccountId;
pub use store::AccountSummary;
pub use store::CredentialStore;
pub use store::Principal;
pub use store::StoreError;
