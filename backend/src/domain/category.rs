//! Thematic groupings for posts.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::labels::{self, EntityLabels};
use super::{CategoryId, PUBLISHED_BY_DEFAULT, Publishable, ShortText, Slug};

/// Input for inserting a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    /// Display title.
    pub title: ShortText,
    /// Free-form description.
    pub description: String,
    /// URL identifier; must be unique across all categories.
    pub slug: Slug,
    /// Initial visibility.
    pub is_published: bool,
}

impl NewCategory {
    /// Published category with the given fields.
    pub fn new(title: ShortText, description: impl Into<String>, slug: Slug) -> Self {
        Self {
            title,
            description: description.into(),
            slug,
            is_published: PUBLISHED_BY_DEFAULT,
        }
    }
}

/// Persisted category.
///
/// ## Invariants
/// - `slug` is unique among categories; the store rejects duplicates with
///   [`PersistenceError::UniqueViolation`](crate::domain::ports::PersistenceError::UniqueViolation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    id: CategoryId,
    #[serde(deserialize_with = "crate::domain::short_text::deserialize_title")]
    title: ShortText,
    description: String,
    slug: Slug,
    #[serde(flatten)]
    publishable: Publishable,
}

/// Stored column values used to rebuild a [`Category`].
#[derive(Debug, Clone)]
pub struct CategoryParts {
    /// Store-assigned identifier.
    pub id: CategoryId,
    /// Display title.
    pub title: ShortText,
    /// Free-form description.
    pub description: String,
    /// URL identifier.
    pub slug: Slug,
    /// Visibility flag and creation timestamp.
    pub publishable: Publishable,
}

impl Category {
    /// Verbose names used by presentation layers.
    pub const LABELS: EntityLabels = labels::CATEGORY;

    /// Rehydrate a category from stored values.
    pub fn from_parts(parts: CategoryParts) -> Self {
        let CategoryParts {
            id,
            title,
            description,
            slug,
            publishable,
        } = parts;
        Self {
            id,
            title,
            description,
            slug,
            publishable,
        }
    }

    /// Store-assigned identifier.
    pub const fn id(&self) -> CategoryId {
        self.id
    }

    /// Display title.
    pub const fn title(&self) -> &ShortText {
        &self.title
    }

    /// Free-form description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// URL identifier.
    pub const fn slug(&self) -> &Slug {
        &self.slug
    }

    /// Visibility flag and creation timestamp.
    pub const fn publishable(&self) -> &Publishable {
        &self.publishable
    }

    /// Replace the title.
    pub fn set_title(&mut self, title: ShortText) {
        self.title = title;
    }

    /// Replace the description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Replace the slug. Uniqueness is checked when the change is stored.
    pub fn set_slug(&mut self, slug: Slug) {
        self.slug = slug;
    }

    /// Show or hide the category.
    pub const fn set_published(&mut self, is_published: bool) {
        self.publishable.set_published(is_published);
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.title.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    #[rstest]
    fn new_categories_are_published_and_display_their_title() {
        let draft = NewCategory::new(
            ShortText::new("title", "Путешествия").expect("valid title"),
            "Заметки в дороге",
            Slug::new("travel").expect("valid slug"),
        );
        assert!(draft.is_published);

        let mut category = Category::from_parts(CategoryParts {
            id: CategoryId::new(1),
            title: draft.title,
            description: draft.description,
            slug: draft.slug,
            publishable: Publishable::new(true, Utc::now()),
        });
        category.set_published(false);

        assert_eq!(category.to_string(), "Путешествия");
        assert!(!category.publishable().is_published());
        assert_eq!(Category::LABELS.plural, "Категории");
    }
}
