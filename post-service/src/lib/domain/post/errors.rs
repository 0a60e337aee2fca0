use thiserror::Error;

/// Error for post operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostError {
    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
