//! PostgreSQL-backed `PostRepository` implementation using Diesel ORM.
//!
//! Listings are built as boxed queries so scope and visibility filters can be
//! combined at runtime. Visibility joins against published categories through
//! a subselect rather than loading category rows.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{PersistenceError, PostQuery, PostRepository, PostScope};
use crate::domain::{
    CategoryId, ImagePath, LocationId, NewPost, Post, PostId, PostParts, Publishable, ShortText,
    UserId, ValidationError,
};

use super::diesel_error_mapping::{
    count_to_u64, map_corrupt_row, map_diesel_error, map_pool_error,
};
use super::models::{NewPostRow, PostRow, PostUpdate};
use super::pool::DbPool;
use super::schema::{categories, comments, posts};

/// Diesel-backed implementation of the post repository port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselPostRepository {
    /// Create a repository that stamps `created_at` from `clock`.
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

fn row_to_post(row: PostRow) -> Result<Post, PersistenceError> {
    let PostRow {
        id,
        title,
        text,
        pub_date,
        image,
        author_id,
        location_id,
        category_id,
        is_published,
        created_at,
    } = row;
    let corrupt = |err: ValidationError| map_corrupt_row("posts", &err);

    Ok(Post::from_parts(PostParts {
        id: PostId::new(id),
        title: ShortText::new("title", title).map_err(corrupt)?,
        text,
        pub_date,
        image: image.map(ImagePath::new).transpose().map_err(corrupt)?,
        author: UserId::from_uuid(author_id),
        location: location_id.map(LocationId::new),
        category: category_id.map(CategoryId::new),
        publishable: Publishable::new(is_published, created_at),
    }))
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewPostRow {
            title: post.title.as_ref(),
            text: &post.text,
            pub_date: post.pub_date,
            image: post.image.as_ref().map(AsRef::as_ref),
            author_id: *post.author.as_uuid(),
            location_id: post.location.map(LocationId::get),
            category_id: post.category.map(CategoryId::get),
            is_published: post.is_published,
            created_at: self.clock.utc(),
        };

        let stored = diesel::insert_into(posts::table)
            .values(&row)
            .returning(PostRow::as_returning())
            .get_result::<PostRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_post(stored)
    }

    async fn update(&self, post: &Post) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = PostUpdate {
            title: post.title().as_ref(),
            text: post.text(),
            pub_date: post.pub_date(),
            image: post.image().map(AsRef::as_ref),
            author_id: *post.author().as_uuid(),
            location_id: post.location().map(LocationId::get),
            category_id: post.category().map(CategoryId::get),
            is_published: post.publishable().is_published(),
        };

        let updated = diesel::update(posts::table.find(post.id().get()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated == 0 {
            return Err(PersistenceError::not_found(format!("post {}", post.id())));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = posts::table
            .find(id.get())
            .select(PostRow::as_select())
            .first::<PostRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_post).transpose()
    }

    async fn list(&self, query: PostQuery) -> Result<Vec<Post>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut statement = posts::table.select(PostRow::as_select()).into_boxed();
        statement = match query.scope {
            PostScope::All => statement,
            PostScope::Author(author) => statement.filter(posts::author_id.eq(*author.as_uuid())),
            PostScope::Category(category) => {
                statement.filter(posts::category_id.eq(category.get()))
            }
            PostScope::Location(location) => {
                statement.filter(posts::location_id.eq(location.get()))
            }
        };

        if let Some(instant) = query.visible_at {
            let published_categories = categories::table
                .filter(categories::is_published.eq(true))
                .select(categories::id.nullable());
            statement = statement
                .filter(posts::is_published.eq(true))
                .filter(posts::pub_date.le(instant))
                .filter(posts::category_id.eq_any(published_categories));
        }

        let rows: Vec<PostRow> = statement
            .order((posts::pub_date.desc(), posts::id.desc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        debug!(scope = ?query.scope, count = rows.len(), "listed posts");
        rows.into_iter().map(row_to_post).collect()
    }

    async fn delete(&self, id: PostId) -> Result<bool, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(posts::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map(|deleted| deleted > 0)
            .map_err(map_diesel_error)
    }

    async fn comment_count(&self, post: PostId) -> Result<u64, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let count: i64 = comments::table
            .filter(comments::post_id.eq(post.get()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        count_to_u64(count)
    }
}
