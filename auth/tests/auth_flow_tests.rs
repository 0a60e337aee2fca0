mod common;

use std::sync::Arc;

use auth::AuthError;
use auth::CredentialStore;
use auth::PasswordHasher;
use chrono::Duration;
use common::TestAuth;

#[tokio::test]
async fn test_signup_login_authorize() {
    let auth = TestAuth::new();

    let summary = auth.authenticator.signup("alice", "pw1").await.unwrap();
    assert_eq!(summary.username, "alice");
    assert!(summary.is_active);

    let token = auth.authenticator.login("alice", "pw1").await.unwrap();
    assert_eq!(auth.codec.decode(&token).unwrap().sub, "alice");

    let principal = auth.authorizer.authorize(&token).await.unwrap();
    assert_eq!(principal.id, summary.id);
    assert_eq!(principal.username, "alice");
    assert!(principal.is_active);
}

#[tokio::test]
async fn test_deactivated_account_rejected_with_live_token() {
    let auth = TestAuth::new();

    auth.authenticator.signup("alice", "pw1").await.unwrap();
    let token = auth.authenticator.login("alice", "pw1").await.unwrap();
    assert!(auth.authorizer.authorize(&token).await.is_ok());

    auth.store.set_active("alice", false);

    assert_eq!(
        auth.authorizer.authorize(&token).await,
        Err(AuthError::InactiveAccount)
    );

    auth.store.set_active("alice", true);
    assert!(auth.authorizer.authorize(&token).await.is_ok());
}

#[tokio::test]
async fn test_removed_account_rejected_with_live_token() {
    let auth = TestAuth::new();

    auth.authenticator.signup("alice", "pw1").await.unwrap();
    let token = auth.authenticator.login("alice", "pw1").await.unwrap();

    auth.store.remove("alice");

    assert_eq!(
        auth.authorizer.authorize(&token).await,
        Err(AuthError::InvalidCredentials)
    );
}

#[tokio::test]
async fn test_second_signup_with_same_username_fails() {
    let auth = TestAuth::new();

    auth.authenticator.signup("alice", "pw1").await.unwrap();

    assert_eq!(
        auth.authenticator.signup("alice", "something-else").await,
        Err(AuthError::UsernameTaken("alice".to_string()))
    );
    assert_eq!(auth.store.len(), 1);

    // Usernames are case-sensitive
    assert!(auth.authenticator.signup("Alice", "pw1").await.is_ok());
    assert_eq!(auth.store.len(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_duplicate_signups_create_one_account() {
    let auth = Arc::new(TestAuth::new());

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let auth = Arc::clone(&auth);
            tokio::spawn(async move {
                auth.authenticator
                    .signup("alice", &format!("password-{}", i))
                    .await
            })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(err) => assert_eq!(err, AuthError::UsernameTaken("alice".to_string())),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(auth.store.len(), 1);
}

#[tokio::test]
async fn test_stored_hash_is_salted_and_verifiable() {
    let auth = TestAuth::new();

    auth.authenticator.signup("alice", "same-password").await.unwrap();
    auth.authenticator.signup("bob", "same-password").await.unwrap();

    let alice_hash = auth.store.stored_hash("alice").unwrap();
    let bob_hash = auth.store.stored_hash("bob").unwrap();

    assert_ne!(alice_hash, bob_hash);
    assert_ne!(alice_hash, "same-password");

    let hasher = PasswordHasher::new();
    assert!(hasher.verify("same-password", &alice_hash));
    assert!(hasher.verify("same-password", &bob_hash));
}

#[tokio::test]
async fn test_login_rejections_share_one_error() {
    let auth = TestAuth::new();
    auth.authenticator.signup("alice", "pw1").await.unwrap();

    let wrong_password = auth.authenticator.login("alice", "pw2").await.unwrap_err();
    let unknown_user = auth.authenticator.login("nobody", "pw1").await.unwrap_err();

    assert_eq!(wrong_password, AuthError::InvalidCredentials);
    assert_eq!(wrong_password, unknown_user);
    assert_eq!(wrong_password.to_string(), unknown_user.to_string());
}

#[tokio::test]
async fn test_zero_ttl_token_is_expired() {
    let auth = TestAuth::new();
    auth.authenticator.signup("alice", "pw1").await.unwrap();

    let token = auth
        .codec
        .issue_with_ttl("alice", Duration::zero())
        .unwrap();

    assert_eq!(
        auth.authorizer.authorize(&token).await,
        Err(AuthError::TokenExpired)
    );
}

#[tokio::test]
async fn test_flipped_signature_is_rejected() {
    let auth = TestAuth::new();
    auth.authenticator.signup("alice", "pw1").await.unwrap();
    let token = auth.authenticator.login("alice", "pw1").await.unwrap();

    let mut bytes = token.into_bytes();
    let last = bytes.len() - 1;
    bytes[last] = if bytes[last] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(bytes).unwrap();

    assert_eq!(
        auth.authorizer.authorize(&tampered).await,
        Err(AuthError::InvalidSignature)
    );
}

#[tokio::test]
async fn test_principal_matches_account_by_id() {
    let auth = TestAuth::new();
    let summary = auth.authenticator.signup("alice", "pw1").await.unwrap();
    let token = auth.authenticator.login("alice", "pw1").await.unwrap();

    let principal = auth.authorizer.authorize(&token).await.unwrap();
    let account = auth
        .store
        .find_account_by_id(principal.id)
        .await
        .unwrap()
        .expect("principal id resolves to an account");

    assert_eq!(account.id, summary.id);
    assert_eq!(account.username, principal.username);
}
