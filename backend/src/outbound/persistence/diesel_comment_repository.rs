//! PostgreSQL-backed `CommentRepository` implementation using Diesel ORM.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::Clock;

use crate::domain::ports::{CommentRepository, PersistenceError};
use crate::domain::{Comment, CommentId, NewComment, PostId, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CommentRow, CommentUpdate, NewCommentRow};
use super::pool::DbPool;
use super::schema::comments;

/// Diesel-backed implementation of the comment repository port.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselCommentRepository {
    /// Create a repository that stamps `created_at` from `clock`.
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

fn row_to_comment(row: CommentRow) -> Comment {
    Comment::from_parts(
        CommentId::new(row.id),
        row.text,
        PostId::new(row.post_id),
        row.created_at,
        UserId::from_uuid(row.author_id),
    )
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn create(&self, comment: NewComment) -> Result<Comment, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewCommentRow {
            text: &comment.text,
            post_id: comment.post.get(),
            created_at: self.clock.utc(),
            author_id: *comment.author.as_uuid(),
        };

        diesel::insert_into(comments::table)
            .values(&row)
            .returning(CommentRow::as_returning())
            .get_result::<CommentRow>(&mut conn)
            .await
            .map(row_to_comment)
            .map_err(map_diesel_error)
    }

    async fn update(&self, comment: &Comment) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(comments::table.find(comment.id().get()))
            .set(&CommentUpdate {
                text: comment.text(),
            })
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated == 0 {
            return Err(PersistenceError::not_found(format!(
                "comment {}",
                comment.id()
            )));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        comments::table
            .find(id.get())
            .select(CommentRow::as_select())
            .first::<CommentRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(row_to_comment))
            .map_err(map_diesel_error)
    }

    async fn list_for_post(&self, post: PostId) -> Result<Vec<Comment>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CommentRow> = comments::table
            .filter(comments::post_id.eq(post.get()))
            .order((comments::created_at.asc(), comments::id.asc()))
            .select(CommentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_comment).collect())
    }

    async fn delete(&self, id: CommentId) -> Result<bool, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(comments::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map(|deleted| deleted > 0)
            .map_err(map_diesel_error)
    }
}
