//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Deleting a user relies on the `ON DELETE CASCADE` foreign keys of
//! `posts` and `comments` to remove everything the user authored.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{PersistenceError, UserRepository};
use crate::domain::{User, UserId, Username};

use super::diesel_error_mapping::{map_corrupt_row, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: UserRow) -> Result<User, PersistenceError> {
    let username = Username::new(row.username).map_err(|err| map_corrupt_row("users", &err))?;
    Ok(User::new(UserId::from_uuid(row.id), username))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn upsert(&self, user: &User) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            id: *user.id().as_uuid(),
            username: user.username().as_ref(),
        };
        let update_row = UserUpdate {
            username: user.username().as_ref(),
        };

        diesel::insert_into(users::table)
            .values(&new_row)
            .on_conflict(users::id)
            .do_update()
            .set(&update_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn delete(&self, id: &UserId) -> Result<bool, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(users::table.filter(users::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        debug!(user_id = %id, deleted, "deleted user");
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    fn row_conversion_keeps_identity() {
        let id = Uuid::new_v4();
        let user = row_to_user(UserRow {
            id,
            username: "ada".to_owned(),
        })
        .expect("valid row");

        assert_eq!(user.id().as_uuid(), &id);
        assert_eq!(user.to_string(), "ada");
    }

    #[rstest]
    fn row_conversion_rejects_blank_username() {
        let error = row_to_user(UserRow {
            id: Uuid::new_v4(),
            username: "  ".to_owned(),
        })
        .expect_err("blank username");

        assert!(matches!(error, PersistenceError::Query { .. }));
        assert!(error.to_string().contains("invalid users row"));
    }
}
