//! Port for post persistence and post listings.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{CategoryId, LocationId, NewPost, Post, PostId, UserId};

use super::PersistenceError;

/// Which posts a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostScope {
    /// Every post.
    #[default]
    All,
    /// Posts written by one user.
    Author(UserId),
    /// Posts filed under one category.
    Category(CategoryId),
    /// Posts tagged with one location.
    Location(LocationId),
}

/// Listing request for [`PostRepository::list`].
///
/// Results always use the default post ordering: `pub_date` descending.
///
/// # Examples
/// ```
/// use blogicum::domain::CategoryId;
/// use blogicum::domain::ports::{PostQuery, PostScope};
/// use chrono::Utc;
///
/// let query = PostQuery::scoped(PostScope::Category(CategoryId::new(3)))
///     .visible_at(Utc::now());
/// assert!(query.visible_at.is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PostQuery {
    /// Subset of posts to list.
    pub scope: PostScope,
    /// When set, keep only posts a reader may see at this instant: published,
    /// `pub_date` not in the future, and filed under a published category.
    pub visible_at: Option<DateTime<Utc>>,
}

impl PostQuery {
    /// Every post, unfiltered.
    pub fn all() -> Self {
        Self::default()
    }

    /// Posts in `scope`, unfiltered.
    pub fn scoped(scope: PostScope) -> Self {
        Self {
            scope,
            visible_at: None,
        }
    }

    /// Restrict the listing to posts visible at `instant`.
    #[must_use]
    pub const fn visible_at(mut self, instant: DateTime<Utc>) -> Self {
        self.visible_at = Some(instant);
        self
    }
}

/// Storage for [`Post`] records.
///
/// # Constraints
///
/// - `author` must exist; deleting the author deletes the post.
/// - `location` and `category` must exist when set; deleting them sets the
///   reference to `None`.
/// - Deleting a post deletes its comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a post, stamping `created_at` with the current time.
    async fn create(&self, post: NewPost) -> Result<Post, PersistenceError>;

    /// Persist the mutable fields of an existing post.
    ///
    /// `created_at` is never written.
    async fn update(&self, post: &Post) -> Result<(), PersistenceError>;

    /// Fetch a post by identifier.
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PersistenceError>;

    /// List posts newest `pub_date` first.
    async fn list(&self, query: PostQuery) -> Result<Vec<Post>, PersistenceError>;

    /// Delete a post and its comments.
    async fn delete(&self, id: PostId) -> Result<bool, PersistenceError>;

    /// Number of comments referencing `post`, computed on demand.
    async fn comment_count(&self, post: PostId) -> Result<u64, PersistenceError>;
}
