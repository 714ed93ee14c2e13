//! Failure taxonomy shared by every content repository port.

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by content repository adapters.
    ///
    /// Constraint variants carry the name of the violated constraint exactly
    /// as the store reports it (for example `categories_slug_key` or
    /// `posts_author_id_fkey`), so callers can tell which rule failed.
    pub enum PersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "content repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "content repository query failed: {message}",
        /// An update targeted a record that does not exist.
        NotFound { entity: String } => "{entity} not found",
        /// A unique constraint rejected the write.
        UniqueViolation { constraint: String } => "unique constraint violated: {constraint}",
        /// A foreign key pointed at a missing record.
        ForeignKeyViolation { constraint: String } =>
            "foreign key constraint violated: {constraint}",
        /// A required column was left empty.
        NotNullViolation { message: String } => "not-null constraint violated: {message}",
    }
}

/// Names of the store constraints adapters report in [`PersistenceError`].
pub mod constraint {
    /// Unique slug across categories.
    pub const CATEGORY_SLUG_UNIQUE: &str = "categories_slug_key";
    /// `posts.author_id` references `users`.
    pub const POST_AUTHOR_FK: &str = "posts_author_id_fkey";
    /// `posts.location_id` references `locations`.
    pub const POST_LOCATION_FK: &str = "posts_location_id_fkey";
    /// `posts.category_id` references `categories`.
    pub const POST_CATEGORY_FK: &str = "posts_category_id_fkey";
    /// `comments.post_id` references `posts`.
    pub const COMMENT_POST_FK: &str = "comments_post_id_fkey";
    /// `comments.author_id` references `users`.
    pub const COMMENT_AUTHOR_FK: &str = "comments_author_id_fkey";
}

impl PersistenceError {
    /// Whether this error reports a violated store constraint rather than an
    /// infrastructure failure.
    pub const fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Self::UniqueViolation { .. }
                | Self::ForeignKeyViolation { .. }
                | Self::NotNullViolation { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PersistenceError::unique_violation("categories_slug_key"), true)]
    #[case(PersistenceError::foreign_key_violation("posts_author_id_fkey"), true)]
    #[case(PersistenceError::not_null_violation("author_id"), true)]
    #[case(PersistenceError::connection("refused"), false)]
    #[case(PersistenceError::not_found("post 4"), false)]
    fn classifies_constraint_violations(#[case] error: PersistenceError, #[case] expected: bool) {
        assert_eq!(error.is_constraint_violation(), expected);
    }

    #[rstest]
    fn messages_name_the_constraint() {
        let error = PersistenceError::unique_violation("categories_slug_key");
        assert_eq!(
            error.to_string(),
            "unique constraint violated: categories_slug_key"
        );
    }
}
