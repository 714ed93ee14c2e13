//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{categories, comments, locations, posts, users};

// ---------------------------------------------------------------------------
// User models
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
}

/// Changeset struct for updating existing user records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub username: &'a str,
}

// ---------------------------------------------------------------------------
// Location models
// ---------------------------------------------------------------------------

/// Row struct for reading from the locations table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = locations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LocationRow {
    pub id: i64,
    pub name: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new location records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = locations)]
pub(crate) struct NewLocationRow<'a> {
    pub name: &'a str,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

/// Changeset for updating a location. Excludes `created_at`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = locations)]
pub(crate) struct LocationUpdate<'a> {
    pub name: &'a str,
    pub is_published: bool,
}

// ---------------------------------------------------------------------------
// Category models
// ---------------------------------------------------------------------------

/// Row struct for reading from the categories table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategoryRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new category records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = categories)]
pub(crate) struct NewCategoryRow<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub slug: &'a str,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

/// Changeset for updating a category. Excludes `created_at`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = categories)]
pub(crate) struct CategoryUpdate<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub slug: &'a str,
    pub is_published: bool,
}

// ---------------------------------------------------------------------------
// Post models
// ---------------------------------------------------------------------------

/// Row struct for reading from the posts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PostRow {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub image: Option<String>,
    pub author_id: Uuid,
    pub location_id: Option<i64>,
    pub category_id: Option<i64>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new post records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub(crate) struct NewPostRow<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub pub_date: DateTime<Utc>,
    pub image: Option<&'a str>,
    pub author_id: Uuid,
    pub location_id: Option<i64>,
    pub category_id: Option<i64>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

/// Changeset for updating a post. Excludes `created_at`.
///
/// `None` clears nullable columns instead of leaving them untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = posts)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct PostUpdate<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub pub_date: DateTime<Utc>,
    pub image: Option<&'a str>,
    pub author_id: Uuid,
    pub location_id: Option<i64>,
    pub category_id: Option<i64>,
    pub is_published: bool,
}

// ---------------------------------------------------------------------------
// Comment models
// ---------------------------------------------------------------------------

/// Row struct for reading from the comments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub id: i64,
    pub text: String,
    pub post_id: i64,
    pub created_at: DateTime<Utc>,
    pub author_id: Uuid,
}

/// Insertable struct for creating new comment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub(crate) struct NewCommentRow<'a> {
    pub text: &'a str,
    pub post_id: i64,
    pub created_at: DateTime<Utc>,
    pub author_id: Uuid,
}

/// Changeset for editing a comment. Only the text is mutable.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = comments)]
pub(crate) struct CommentUpdate<'a> {
    pub text: &'a str,
}
