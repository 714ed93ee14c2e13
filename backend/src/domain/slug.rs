//! URL-safe category identifiers.
//!
//! Slugs are non-empty identifiers of at most [`SLUG_MAX_LENGTH`] characters
//! composed of ASCII letters, digits, hyphens and underscores. Uniqueness is
//! a store constraint and is not checked here.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Maximum slug length in characters.
pub const SLUG_MAX_LENGTH: usize = 50;

/// Validated category slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Validate and construct a [`Slug`].
    ///
    /// # Examples
    /// ```
    /// use blogicum::domain::Slug;
    ///
    /// assert!(Slug::new("travel_2024-summer").is_ok());
    /// assert!(Slug::new("no spaces").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Self::from_owned(value.into())
    }

    fn from_owned(value: String) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::empty("slug"));
        }
        if value.chars().count() > SLUG_MAX_LENGTH {
            return Err(ValidationError::too_long("slug", SLUG_MAX_LENGTH));
        }
        if !has_allowed_slug_chars(&value) {
            return Err(ValidationError::InvalidSlugCharacters);
        }
        Ok(Self(value))
    }
}

fn has_allowed_slug_chars(value: &str) -> bool {
    value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

impl TryFrom<String> for Slug {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("travel")]
    #[case("Travel-2024")]
    #[case("under_score")]
    #[case("-")]
    fn accepts_url_safe_slugs(#[case] raw: &str) {
        assert_eq!(Slug::new(raw).expect("valid slug").as_ref(), raw);
    }

    #[rstest]
    #[case("with space")]
    #[case("путешествия")]
    #[case("dots.are.bad")]
    #[case(" leading")]
    fn rejects_characters_outside_the_slug_alphabet(#[case] raw: &str) {
        assert_eq!(Slug::new(raw), Err(ValidationError::InvalidSlugCharacters));
    }

    #[rstest]
    fn rejects_empty_and_overlong_slugs() {
        assert_eq!(Slug::new(""), Err(ValidationError::Empty { field: "slug" }));
        assert!(Slug::new("a".repeat(SLUG_MAX_LENGTH)).is_ok());
        assert_eq!(
            Slug::new("a".repeat(SLUG_MAX_LENGTH + 1)),
            Err(ValidationError::TooLong {
                field: "slug",
                max: SLUG_MAX_LENGTH
            })
        );
    }

    #[rstest]
    fn try_from_string_applies_the_same_rules() {
        assert!(Slug::try_from("bad slug".to_owned()).is_err());
        assert_eq!(
            String::from(Slug::try_from("good-slug".to_owned()).expect("valid slug")),
            "good-slug"
        );
    }
}
