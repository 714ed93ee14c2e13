//! Repository ports for the content schema.
//!
//! Adapters in `outbound` implement these traits. Every port reports
//! failures through [`PersistenceError`].

mod macros;
pub(crate) use macros::define_port_error;

mod category_repository;
mod comment_repository;
mod location_repository;
mod persistence_error;
mod post_repository;
mod user_repository;

#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use category_repository::CategoryRepository;
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::CommentRepository;
#[cfg(test)]
pub use location_repository::MockLocationRepository;
pub use location_repository::LocationRepository;
pub use persistence_error::{PersistenceError, constraint};
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{PostQuery, PostRepository, PostScope};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
mod tests;
