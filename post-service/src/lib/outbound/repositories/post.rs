use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::post::ports::PostRepository;

pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: PostId(row.id),
            title: row.title,
            content: row.content,
        }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, command: CreatePostCommand) -> Result<Post, PostError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (title, content)
            VALUES ($1, $2)
            RETURNING id, title, content
            "#,
        )
        .bind(&command.title)
        .bind(&command.content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, content
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        Ok(row.map(Post::from))
    }

    async fn list_all(&self) -> Result<Vec<Post>, PostError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, content
            FROM posts
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn update(
        &self,
        id: PostId,
        command: UpdatePostCommand,
    ) -> Result<Option<Post>, PostError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts
            SET title = COALESCE($2, title), content = COALESCE($3, content)
            WHERE id = $1
            RETURNING id, title, content
            "#,
        )
        .bind(id.0)
        .bind(command.title)
        .bind(command.content)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        Ok(row.map(Post::from))
    }

    async fn delete(&self, id: PostId) -> Result<bool, PostError> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
