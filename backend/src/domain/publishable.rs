//! Visibility flag and creation timestamp shared by posts, categories and
//! locations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Field group embedded by value in every publishable record.
///
/// ## Invariants
/// - `created_at` is assigned by the store when the record is inserted and
///   has no setter, so it can never change afterwards.
/// - `is_published` may be toggled freely; there is no transition check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publishable {
    is_published: bool,
    created_at: DateTime<Utc>,
}

impl Publishable {
    /// Rehydrate the field group from stored values.
    pub const fn new(is_published: bool, created_at: DateTime<Utc>) -> Self {
        Self {
            is_published,
            created_at,
        }
    }

    /// Whether the record is visible to readers.
    pub const fn is_published(&self) -> bool {
        self.is_published
    }

    /// When the record was inserted.
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Show or hide the record.
    pub const fn set_published(&mut self, is_published: bool) {
        self.is_published = is_published;
    }
}

/// Default for `is_published` on freshly created records.
pub const PUBLISHED_BY_DEFAULT: bool = true;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    fn toggling_visibility_keeps_created_at() {
        let created_at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let mut fields = Publishable::new(PUBLISHED_BY_DEFAULT, created_at);

        fields.set_published(false);
        assert!(!fields.is_published());
        fields.set_published(true);

        assert!(fields.is_published());
        assert_eq!(fields.created_at(), created_at);
    }
}
