//! Field-level validation errors for content value types.
//!
//! These are raised by constructors before anything reaches a repository.
//! Constraint violations that need the store (uniqueness, dangling
//! references) are reported separately through
//! [`PersistenceError`](crate::domain::ports::PersistenceError).

/// Validation errors returned by the content value-type constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required text field was empty or only whitespace.
    #[error("{field} must not be empty")]
    Empty {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A bounded text field exceeded its maximum length in characters.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Name of the offending field.
        field: &'static str,
        /// Maximum permitted length in characters.
        max: usize,
    },
    /// A slug contained characters outside `[A-Za-z0-9_-]`.
    #[error("slug may only contain latin letters, digits, hyphens and underscores")]
    InvalidSlugCharacters,
    /// A user identifier was not a valid UUID.
    #[error("user id must be a valid UUID")]
    InvalidUserId,
    /// An image path was absolute or escaped the upload root.
    #[error("image path must be relative to the upload root: {path}")]
    InvalidImagePath {
        /// The rejected path.
        path: String,
    },
}

impl ValidationError {
    pub(crate) const fn empty(field: &'static str) -> Self {
        Self::Empty { field }
    }

    pub(crate) const fn too_long(field: &'static str, max: usize) -> Self {
        Self::TooLong { field, max }
    }
}
