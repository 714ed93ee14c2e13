//! Bounded single-line text used for titles and names.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::ValidationError;

/// Maximum length, in characters, of titles and names.
pub const DEFAULT_MAX_LENGTH: usize = 256;

/// Non-blank text of at most [`DEFAULT_MAX_LENGTH`] characters.
///
/// Backs `Post::title`, `Category::title` and `Location::name`. Length is
/// counted in Unicode scalar values, matching the database `varchar(256)`
/// check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortText(String);

impl ShortText {
    /// Validate `value` for the named field.
    ///
    /// # Examples
    /// ```
    /// use blogicum::domain::ShortText;
    ///
    /// let title = ShortText::new("title", "Morning walk").expect("valid title");
    /// assert_eq!(title.as_ref(), "Morning walk");
    /// assert!(ShortText::new("title", "   ").is_err());
    /// ```
    pub fn new(field: &'static str, value: impl Into<String>) -> Result<Self, ValidationError> {
        Self::from_owned(field, value.into())
    }

    fn from_owned(field: &'static str, value: String) -> Result<Self, ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::empty(field));
        }
        if value.chars().count() > DEFAULT_MAX_LENGTH {
            return Err(ValidationError::too_long(field, DEFAULT_MAX_LENGTH));
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for ShortText {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ShortText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ShortText> for String {
    fn from(value: ShortText) -> Self {
        value.0
    }
}

impl TryFrom<String> for ShortText {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned("text", value)
    }
}

fn deserialize_field<'de, D>(field: &'static str, deserializer: D) -> Result<ShortText, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    ShortText::from_owned(field, raw).map_err(serde::de::Error::custom)
}

/// Deserialise a `title` field, naming it in validation errors.
pub(crate) fn deserialize_title<'de, D>(deserializer: D) -> Result<ShortText, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_field("title", deserializer)
}

/// Deserialise a `name` field, naming it in validation errors.
pub(crate) fn deserialize_name<'de, D>(deserializer: D) -> Result<ShortText, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_field("name", deserializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde::de::IntoDeserializer;
    use serde::de::value::{Error as ValueError, StringDeserializer};

    fn input(raw: &str) -> StringDeserializer<ValueError> {
        raw.to_owned().into_deserializer()
    }

    #[rstest]
    #[case("a")]
    #[case("Путешествие на Байкал")]
    fn accepts_non_blank_text(#[case] raw: &str) {
        let text = ShortText::new("title", raw).expect("valid text");
        assert_eq!(text.as_ref(), raw);
    }

    #[rstest]
    #[case("")]
    #[case(" \t ")]
    fn rejects_blank_text(#[case] raw: &str) {
        assert_eq!(
            ShortText::new("name", raw),
            Err(ValidationError::Empty { field: "name" })
        );
    }

    #[rstest]
    fn length_is_counted_in_characters() {
        let at_limit = "ж".repeat(DEFAULT_MAX_LENGTH);
        assert!(ShortText::new("title", at_limit).is_ok());

        let over_limit = "ж".repeat(DEFAULT_MAX_LENGTH + 1);
        assert_eq!(
            ShortText::new("title", over_limit),
            Err(ValidationError::TooLong {
                field: "title",
                max: DEFAULT_MAX_LENGTH
            })
        );
    }

    #[rstest]
    #[case::title(deserialize_title(input("  ")), "title must not be empty")]
    #[case::name(deserialize_name(input("")), "name must not be empty")]
    fn field_deserialisers_name_the_field(
        #[case] result: Result<ShortText, ValueError>,
        #[case] message: &str,
    ) {
        let error = result.expect_err("blank text is rejected");
        assert_eq!(error.to_string(), message);
    }

    #[rstest]
    fn field_deserialisers_accept_valid_text() {
        let name = deserialize_name(input("Казань")).expect("valid name");
        assert_eq!(name.as_ref(), "Казань");
    }
}
