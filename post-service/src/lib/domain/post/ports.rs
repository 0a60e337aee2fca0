use async_trait::async_trait;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::UpdatePostCommand;

/// Port for post domain service operations.
#[async_trait]
pub trait PostServicePort: Send + Sync + 'static {
    /// Create a new post.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_post(&self, command: CreatePostCommand) -> Result<Post, PostError>;

    /// Retrieve post by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_post(&self, id: PostId) -> Result<Post, PostError>;

    /// Retrieve all posts, oldest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_posts(&self) -> Result<Vec<Post>, PostError>;

    /// Update an existing post with optional fields.
    ///
    /// An empty command leaves the post untouched and returns it as is.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_post(&self, id: PostId, command: UpdatePostCommand)
        -> Result<Post, PostError>;

    /// Delete an existing post.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_post(&self, id: PostId) -> Result<(), PostError>;
}

/// Persistence operations for posts.
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    /// Persist a new post and return it with its assigned identifier.
    async fn create(&self, command: CreatePostCommand) -> Result<Post, PostError>;

    /// Retrieve post by identifier.
    ///
    /// # Returns
    /// Optional post (None if not found)
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError>;

    /// Retrieve all posts ordered by identifier.
    async fn list_all(&self) -> Result<Vec<Post>, PostError>;

    /// Apply a non-empty update in one statement.
    ///
    /// # Returns
    /// Updated post, or None if it does not exist
    async fn update(&self, id: PostId, command: UpdatePostCommand)
        -> Result<Option<Post>, PostError>;

    /// Remove a post.
    ///
    /// # Returns
    /// Whether a post was removed
    async fn delete(&self, id: PostId) -> Result<bool, PostError>;
}
