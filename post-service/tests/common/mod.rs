use std::collections::BTreeMap;
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
use post_service::domain::post::errors::PostError;
use post_service::domain::post::models::CreatePostCommand;
use post_service::domain::post::models::Post;
use post_service::domain::post::models::PostId;
use post_service::domain::post::models::UpdatePostCommand;
use post_service::domain::post::ports::PostRepository;
use post_service::domain::post::service::PostService;
use post_service::inbound::http::router::create_router;
use serde_json::json;

pub const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Credential store kept in memory, standing in for the accounts table.
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

/// Post repository backed by an ordered map, standing in for the posts table.
#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: Mutex<BTreeMap<PostId, Post>>,
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, command: CreatePostCommand) -> Result<Post, PostError> {
        let mut posts = self.posts.lock().unwrap();
        let next_id = posts.keys().next_back().map_or(1, |id| id.0 + 1);

        let post = Post {
            id: PostId(next_id),
            title: command.title,
            content: command.content,
        };
        posts.insert(post.id, post.clone());

        Ok(post)
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError> {
        Ok(self.posts.lock().unwrap().get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Post>, PostError> {
        Ok(self.posts.lock().unwrap().values().cloned().collect())
    }

    async fn update(
        &self,
        id: PostId,
        command: UpdatePostCommand,
    ) -> Result<Option<Post>, PostError> {
        let mut posts = self.posts.lock().unwrap();
        let Some(existing) = posts.get(&id).cloned() else {
            return Ok(None);
        };

        let updated = command.apply(existing);
        posts.insert(id, updated.clone());

        Ok(Some(updated))
    }

    async fn delete(&self, id: PostId) -> Result<bool, PostError> {
        Ok(self.posts.lock().unwrap().remove(&id).is_some())
    }
}

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub credential_store: Arc<InMemoryCredentialStore>,
    pub codec: Arc<TokenCodec>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let credential_store = Arc::new(InMemoryCredentialStore::default());
        let codec = Arc::new(TokenCodec::new(SECRET));

        let authenticator = Arc::new(Authenticator::new(
            Arc::clone(&credential_store) as Arc<dyn CredentialStore>,
            Arc::clone(&codec),
            HashingPool::new(4),
        ));
        let authorizer = Arc::new(RequestAuthorizer::new(
            Arc::clone(&credential_store) as Arc<dyn CredentialStore>,
            Arc::clone(&codec),
        ));
        let post_service = Arc::new(PostService::new(Arc::new(
            InMemoryPostRepository::default(),
        )));

        let router = create_router(post_service, authenticator, authorizer);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            credential_store,
            codec,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make PUT request
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    /// Sign up and log in, returning the access token.
    pub async fn signup_and_login(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/auth/signup")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        self.login(username, password).await
    }

    /// Log in with valid credentials, returning the access token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/token")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["access_token"]
            .as_str()
            .expect("Missing access token")
            .to_string()
    }
}
