//! Places a post can be tagged with.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::labels::{self, EntityLabels};
use super::{LocationId, PUBLISHED_BY_DEFAULT, Publishable, ShortText};

/// Input for inserting a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLocation {
    /// Place name.
    pub name: ShortText,
    /// Initial visibility.
    pub is_published: bool,
}

impl NewLocation {
    /// Published location with the given name.
    pub const fn new(name: ShortText) -> Self {
        Self {
            name,
            is_published: PUBLISHED_BY_DEFAULT,
        }
    }
}

/// Persisted location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    id: LocationId,
    #[serde(deserialize_with = "crate::domain::short_text::deserialize_name")]
    name: ShortText,
    #[serde(flatten)]
    publishable: Publishable,
}

impl Location {
    /// Verbose names used by presentation layers.
    pub const LABELS: EntityLabels = labels::LOCATION;

    /// Rehydrate a location from stored values.
    pub const fn from_parts(id: LocationId, name: ShortText, publishable: Publishable) -> Self {
        Self {
            id,
            name,
            publishable,
        }
    }

    /// Store-assigned identifier.
    pub const fn id(&self) -> LocationId {
        self.id
    }

    /// Place name.
    pub const fn name(&self) -> &ShortText {
        &self.name
    }

    /// Visibility flag and creation timestamp.
    pub const fn publishable(&self) -> &Publishable {
        &self.publishable
    }

    /// Rename the place.
    pub fn set_name(&mut self, name: ShortText) {
        self.name = name;
    }

    /// Show or hide the location.
    pub const fn set_published(&mut self, is_published: bool) {
        self.publishable.set_published(is_published);
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    #[rstest]
    fn displays_as_name() {
        let location = Location::from_parts(
            LocationId::new(4),
            ShortText::new("name", "Владивосток").expect("valid name"),
            Publishable::new(true, Utc::now()),
        );
        assert_eq!(location.to_string(), "Владивосток");
    }
}
