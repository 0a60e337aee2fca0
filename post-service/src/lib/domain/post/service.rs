use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::post::ports::PostRepository;
use crate::domain::post::ports::PostServicePort;

/// Domain service implementation for post operations.
pub struct PostService<PR>
where
    PR: PostRepository,
{
    repository: Arc<PR>,
}

impl<PR> PostService<PR>
where
    PR: PostRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<PR> PostServicePort for PostService<PR>
where
    PR: PostRepository,
{
    async fn create_post(&self, command: CreatePostCommand) -> Result<Post, PostError> {
        let post = self.repository.create(command).await?;
        tracing::info!(post_id = %post.id, "Post created");
        Ok(post)
    }

    async fn get_post(&self, id: PostId) -> Result<Post, PostError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound(id.to_string()))
    }

    async fn list_posts(&self) -> Result<Vec<Post>, PostError> {
        self.repository.list_all().await
    }

    async fn update_post(
        &self,
        id: PostId,
        command: UpdatePostCommand,
    ) -> Result<Post, PostError> {
        if command.is_empty() {
            return self.get_post(id).await;
        }

        let post = self
            .repository
            .update(id, command)
            .await?
            .ok_or(PostError::NotFound(id.to_string()))?;

        tracing::info!(post_id = %post.id, "Post updated");
        Ok(post)
    }

    async fn delete_post(&self, id: PostId) -> Result<(), PostError> {
        if !self.repository.delete(id).await? {
            return Err(PostError::NotFound(id.to_string()));
        }

        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }
}
