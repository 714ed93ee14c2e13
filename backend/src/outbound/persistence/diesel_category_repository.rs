//! PostgreSQL-backed `CategoryRepository` implementation using Diesel ORM.
//!
//! Slug uniqueness is enforced by the `categories_slug_key` constraint;
//! violations surface as [`PersistenceError::UniqueViolation`].

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::Clock;

use crate::domain::ports::{CategoryRepository, PersistenceError};
use crate::domain::{
    Category, CategoryId, CategoryParts, NewCategory, Publishable, ShortText, Slug, ValidationError,
};

use super::diesel_error_mapping::{map_corrupt_row, map_diesel_error, map_pool_error};
use super::models::{CategoryRow, CategoryUpdate, NewCategoryRow};
use super::pool::DbPool;
use super::schema::categories;

/// Diesel-backed implementation of the category repository port.
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselCategoryRepository {
    /// Create a repository that stamps `created_at` from `clock`.
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

fn row_to_category(row: CategoryRow) -> Result<Category, PersistenceError> {
    let CategoryRow {
        id,
        title,
        description,
        slug,
        is_published,
        created_at,
    } = row;
    let corrupt = |err: ValidationError| map_corrupt_row("categories", &err);

    Ok(Category::from_parts(CategoryParts {
        id: CategoryId::new(id),
        title: ShortText::new("title", title).map_err(corrupt)?,
        description,
        slug: Slug::new(slug).map_err(corrupt)?,
        publishable: Publishable::new(is_published, created_at),
    }))
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn create(&self, category: NewCategory) -> Result<Category, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewCategoryRow {
            title: category.title.as_ref(),
            description: &category.description,
            slug: category.slug.as_ref(),
            is_published: category.is_published,
            created_at: self.clock.utc(),
        };

        let stored = diesel::insert_into(categories::table)
            .values(&row)
            .returning(CategoryRow::as_returning())
            .get_result::<CategoryRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_category(stored)
    }

    async fn update(&self, category: &Category) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = CategoryUpdate {
            title: category.title().as_ref(),
            description: category.description(),
            slug: category.slug().as_ref(),
            is_published: category.publishable().is_published(),
        };

        let updated = diesel::update(categories::table.find(category.id().get()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated == 0 {
            return Err(PersistenceError::not_found(format!(
                "category {}",
                category.id()
            )));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = categories::table
            .find(id.get())
            .select(CategoryRow::as_select())
            .first::<CategoryRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_category).transpose()
    }

    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Category>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = categories::table
            .filter(categories::slug.eq(slug.as_ref()))
            .select(CategoryRow::as_select())
            .first::<CategoryRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_category).transpose()
    }

    async fn list(&self) -> Result<Vec<Category>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CategoryRow> = categories::table
            .order(categories::id.asc())
            .select(CategoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_category).collect()
    }

    async fn delete(&self, id: CategoryId) -> Result<bool, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(categories::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map(|deleted| deleted > 0)
            .map_err(map_diesel_error)
    }
}
