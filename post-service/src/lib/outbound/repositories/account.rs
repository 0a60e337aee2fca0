use async_trait::async_trait;
use auth::Account;
use auth::AccountId;
use auth::CredentialStore;
use auth::StoreError;
use sqlx::FromRow;
use sqlx::PgPool;

const USERNAME_CONSTRAINT: &str = "accounts_username_key";

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct AccountRow {
    id: i64,
    username: String,
    password_hash: String,
    is_active: bool,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account {
            id: AccountId(row.id),
            username: row.username,
            password_hash: row.password_hash,
            is_active: row.is_active,
        }
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_account_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, username, password_hash, is_active
            FROM accounts
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(row.map(Account::from))
    }

    async fn insert_account(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<Account, StoreError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO accounts (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash, is_active
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(USERNAME_CONSTRAINT)
                {
                    return StoreError::UniquenessViolation(username.to_string());
                }
            }
            StoreError::Unavailable(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn find_account_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, username, password_hash, is_active
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(row.map(Account::from))
    }
}
