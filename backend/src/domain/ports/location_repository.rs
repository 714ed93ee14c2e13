//! Port for location persistence.

use async_trait::async_trait;

use crate::domain::{Location, LocationId, NewLocation};

use super::PersistenceError;

/// Storage for [`Location`] records.
///
/// Deleting a location clears `location` on every post that referenced it;
/// the posts themselves survive.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Insert a location, stamping `created_at` with the current time.
    async fn create(&self, location: NewLocation) -> Result<Location, PersistenceError>;

    /// Persist the mutable fields of an existing location.
    async fn update(&self, location: &Location) -> Result<(), PersistenceError>;

    /// Fetch a location by identifier.
    async fn find_by_id(&self, id: LocationId) -> Result<Option<Location>, PersistenceError>;

    /// All locations in ascending id order.
    async fn list(&self) -> Result<Vec<Location>, PersistenceError>;

    /// Delete a location, detaching it from its posts.
    async fn delete(&self, id: LocationId) -> Result<bool, PersistenceError>;
}
