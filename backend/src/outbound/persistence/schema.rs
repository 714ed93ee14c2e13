//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/*_create_content_schema`
//! exactly. When migrations change the schema, regenerate this file with
//! `diesel print-schema` or update it by hand.

diesel::table! {
    /// Users referenced by posts and comments.
    users (id) {
        /// Primary key: UUID owned by the identity subsystem.
        id -> Uuid,
        /// Login name (max 150 characters).
        username -> Varchar,
    }
}

diesel::table! {
    /// Places posts can be tagged with.
    locations (id) {
        id -> Int8,
        /// Place name (max 256 characters).
        name -> Varchar,
        is_published -> Bool,
        /// Set once on insert.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Thematic groupings for posts. `slug` is unique.
    categories (id) {
        id -> Int8,
        title -> Varchar,
        description -> Text,
        /// Unique URL identifier (max 50 characters).
        slug -> Varchar,
        is_published -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Blog posts.
    ///
    /// `author_id` cascades on user deletion; `location_id` and
    /// `category_id` are set to NULL when the referenced row goes away.
    posts (id) {
        id -> Int8,
        title -> Varchar,
        text -> Text,
        pub_date -> Timestamptz,
        /// Relative upload path (max 100 characters).
        image -> Nullable<Varchar>,
        author_id -> Uuid,
        location_id -> Nullable<Int8>,
        category_id -> Nullable<Int8>,
        is_published -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Reader comments; cascade on post or author deletion.
    comments (id) {
        id -> Int8,
        text -> Text,
        post_id -> Int8,
        created_at -> Timestamptz,
        author_id -> Uuid,
    }
}

diesel::joinable!(posts -> users (author_id));
diesel::joinable!(posts -> locations (location_id));
diesel::joinable!(posts -> categories (category_id));
diesel::joinable!(comments -> posts (post_id));
diesel::joinable!(comments -> users (author_id));

diesel::allow_tables_to_appear_in_same_query!(users, locations, categories, posts, comments);
