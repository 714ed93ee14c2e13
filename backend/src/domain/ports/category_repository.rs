//! Port for category persistence.

use async_trait::async_trait;

use crate::domain::{Category, CategoryId, NewCategory, Slug};

use super::PersistenceError;

/// Storage for [`Category`] records.
///
/// # Constraints
///
/// - `slug` is unique; a duplicate on `create` or `update` fails with
///   [`PersistenceError::UniqueViolation`] naming
///   [`CATEGORY_SLUG_UNIQUE`](super::constraint::CATEGORY_SLUG_UNIQUE).
/// - Deleting a category clears `category` on every post that referenced it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert a category, stamping `created_at` with the current time.
    async fn create(&self, category: NewCategory) -> Result<Category, PersistenceError>;

    /// Persist the mutable fields of an existing category.
    ///
    /// `created_at` is never written.
    async fn update(&self, category: &Category) -> Result<(), PersistenceError>;

    /// Fetch a category by identifier.
    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, PersistenceError>;

    /// Fetch a category by slug.
    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Category>, PersistenceError>;

    /// All categories in ascending id order.
    async fn list(&self) -> Result<Vec<Category>, PersistenceError>;

    /// Delete a category, detaching it from its posts.
    ///
    /// Returns `false` when no such category existed.
    async fn delete(&self, id: CategoryId) -> Result<bool, PersistenceError>;
}
