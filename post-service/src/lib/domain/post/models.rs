use std::fmt;

/// A text post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
}

/// Post unique identifier, assigned by storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostId(pub i64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a new post
#[derive(Debug, Clone)]
pub struct CreatePostCommand {
    pub title: String,
    pub content: String,
}

impl CreatePostCommand {
    pub fn new(title: String, content: String) -> Self {
        Self { title, content }
    }
}

/// Command to update an existing post.
///
/// Only provided fields are changed.
#[derive(Debug, Clone, Default)]
pub struct UpdatePostCommand {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl UpdatePostCommand {
    /// True when the command would change nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }

    /// Apply the provided fields to `post`.
    pub fn apply(self, mut post: Post) -> Post {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        post
    }
}
