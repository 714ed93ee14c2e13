//! Port for the user records content refers to.
//!
//! Users belong to the identity subsystem. The content schema only needs to
//! store them as foreign-key targets and to observe their deletion, which
//! cascades to the user's posts and comments.
use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::PersistenceError;

/// Storage for [`User`] references.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert or update a user record.
    async fn upsert(&self, user: &User) -> Result<(), PersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, PersistenceError>;

    /// Delete a user together with every post and comment they authored.
    ///
    /// Returns `false` when no such user existed.
    async fn delete(&self, id: &UserId) -> Result<bool, PersistenceError>;
}
