//! PostgreSQL-backed `LocationRepository` implementation using Diesel ORM.
//!
//! `posts.location_id` is declared `ON DELETE SET NULL`, so deleting a
//! location detaches it from every post in the same statement.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::Clock;

use crate::domain::ports::{LocationRepository, PersistenceError};
use crate::domain::{Location, LocationId, NewLocation, Publishable, ShortText};

use super::diesel_error_mapping::{map_corrupt_row, map_diesel_error, map_pool_error};
use super::models::{LocationRow, LocationUpdate, NewLocationRow};
use super::pool::DbPool;
use super::schema::locations;

/// Diesel-backed implementation of the location repository port.
#[derive(Clone)]
pub struct DieselLocationRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselLocationRepository {
    /// Create a repository that stamps `created_at` from `clock`.
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

fn row_to_location(row: LocationRow) -> Result<Location, PersistenceError> {
    let LocationRow {
        id,
        name,
        is_published,
        created_at,
    } = row;
    let validated_name =
        ShortText::new("name", name).map_err(|err| map_corrupt_row("locations", &err))?;
    Ok(Location::from_parts(
        LocationId::new(id),
        validated_name,
        Publishable::new(is_published, created_at),
    ))
}

#[async_trait]
impl LocationRepository for DieselLocationRepository {
    async fn create(&self, location: NewLocation) -> Result<Location, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewLocationRow {
            name: location.name.as_ref(),
            is_published: location.is_published,
            created_at: self.clock.utc(),
        };

        let stored = diesel::insert_into(locations::table)
            .values(&row)
            .returning(LocationRow::as_returning())
            .get_result::<LocationRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_location(stored)
    }

    async fn update(&self, location: &Location) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = LocationUpdate {
            name: location.name().as_ref(),
            is_published: location.publishable().is_published(),
        };

        let updated = diesel::update(locations::table.find(location.id().get()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated == 0 {
            return Err(PersistenceError::not_found(format!(
                "location {}",
                location.id()
            )));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: LocationId) -> Result<Option<Location>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = locations::table
            .find(id.get())
            .select(LocationRow::as_select())
            .first::<LocationRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_location).transpose()
    }

    async fn list(&self) -> Result<Vec<Location>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<LocationRow> = locations::table
            .order(locations::id.asc())
            .select(LocationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_location).collect()
    }

    async fn delete(&self, id: LocationId) -> Result<bool, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(locations::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map(|deleted| deleted > 0)
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    #[rstest]
    fn row_conversion_restores_publishable_fields() {
        let created_at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let location = row_to_location(LocationRow {
            id: 9,
            name: "Тбилиси".to_owned(),
            is_published: false,
            created_at,
        })
        .expect("valid row");

        assert_eq!(location.id(), LocationId::new(9));
        assert_eq!(location.to_string(), "Тбилиси");
        assert!(!location.publishable().is_published());
        assert_eq!(location.publishable().created_at(), created_at);
    }
}
