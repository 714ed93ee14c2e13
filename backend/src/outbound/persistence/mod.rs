//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the content repository ports backed by
//! PostgreSQL through `diesel-async` and a shared `bb8` pool.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types.
//! - **Store-enforced rules**: slug uniqueness and delete cascades are
//!   declared in the migrations and reported back as
//!   [`PersistenceError`](crate::domain::ports::PersistenceError) variants.
//! - **Internal models**: row structs (`models.rs`) and the table definitions
//!   (`schema.rs`) never leave this module.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use blogicum::outbound::persistence::{DbPool, DieselPostRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/blogicum")).await?;
//! let posts = DieselPostRepository::new(pool, Arc::new(mockable::DefaultClock));
//! ```

mod diesel_category_repository;
mod diesel_comment_repository;
mod diesel_error_mapping;
mod diesel_location_repository;
mod diesel_post_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_category_repository::DieselCategoryRepository;
pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_location_repository::DieselLocationRepository;
pub use diesel_post_repository::DieselPostRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, revert_all_migrations, run_pending_migrations};
pub use pool::{
    DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_SIZE, DEFAULT_MIN_IDLE, DbPool, PoolConfig, PoolError,
};
