//! Port for comment persistence.

use async_trait::async_trait;

use crate::domain::{Comment, CommentId, NewComment, PostId};

use super::PersistenceError;

/// Storage for [`Comment`] records.
///
/// A comment references a post and an author; both references are required
/// and deleting either referenced record deletes the comment.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Insert a comment, stamping `created_at` with the current time.
    ///
    /// Fails with [`PersistenceError::ForeignKeyViolation`] when the post or
    /// author does not exist.
    async fn create(&self, comment: NewComment) -> Result<Comment, PersistenceError>;

    /// Persist an edited comment body.
    async fn update(&self, comment: &Comment) -> Result<(), PersistenceError>;

    /// Fetch a comment by identifier.
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, PersistenceError>;

    /// Comments on `post`, oldest first.
    async fn list_for_post(&self, post: PostId) -> Result<Vec<Comment>, PersistenceError>;

    /// Delete a single comment.
    async fn delete(&self, id: CommentId) -> Result<bool, PersistenceError>;
}
