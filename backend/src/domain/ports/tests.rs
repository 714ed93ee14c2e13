//! Port-level behaviour: query builders and trait-object usability.

use std::sync::Arc;

use super::*;
use crate::domain::{CategoryId, PostId, UserId};
use chrono::{TimeZone, Utc};
use mockall::predicate::eq;
use rstest::rstest;

#[rstest]
fn default_query_lists_every_post_unfiltered() {
    let query = PostQuery::all();
    assert_eq!(query.scope, PostScope::All);
    assert!(query.visible_at.is_none());
}

#[rstest]
#[case(PostScope::Author(UserId::random()))]
#[case(PostScope::Category(CategoryId::new(2)))]
fn scoped_query_keeps_scope_when_filtered(#[case] scope: PostScope) {
    let instant = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let query = PostQuery::scoped(scope).visible_at(instant);

    assert_eq!(query.scope, scope);
    assert_eq!(query.visible_at, Some(instant));
}

#[tokio::test]
async fn ports_are_usable_as_trait_objects() {
    let mut mock = MockPostRepository::new();
    mock.expect_comment_count()
        .with(eq(PostId::new(9)))
        .times(1)
        .returning(|_| Ok(3));
    let repository: Arc<dyn PostRepository> = Arc::new(mock);

    let count = repository
        .comment_count(PostId::new(9))
        .await
        .expect("count succeeds");

    assert_eq!(count, 3);
}

#[tokio::test]
async fn constraint_failures_propagate_unmodified() {
    let mut mock = MockCategoryRepository::new();
    mock.expect_create()
        .returning(|_| Err(PersistenceError::unique_violation(constraint::CATEGORY_SLUG_UNIQUE)));
    let repository: Arc<dyn CategoryRepository> = Arc::new(mock);

    let draft = crate::domain::NewCategory::new(
        crate::domain::ShortText::new("title", "Travel").expect("valid title"),
        "",
        crate::domain::Slug::new("travel").expect("valid slug"),
    );
    let error = repository
        .create(draft)
        .await
        .expect_err("duplicate slug rejected");

    assert_eq!(
        error,
        PersistenceError::UniqueViolation {
            constraint: "categories_slug_key".to_owned()
        }
    );
}
