//! References to users owned by the external identity subsystem.
//!
//! Content records never own users; they hold a [`UserId`] foreign key.
//! [`User`] carries just enough to resolve that key and to render the
//! author's identity next to a comment.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ValidationError;

/// Maximum username length, matching the identity subsystem's column.
pub const USERNAME_MAX_LENGTH: usize = 150;

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a [`UserId`] from its canonical string form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ValidationError> {
        let raw = id.as_ref();
        if raw.trim() != raw {
            return Err(ValidationError::InvalidUserId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| ValidationError::InvalidUserId)
    }

    /// Wrap an already parsed UUID.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Login name shown as the user's identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Self::from_owned(value.into())
    }

    fn from_owned(value: String) -> Result<Self, ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::empty("username"));
        }
        if value.chars().count() > USERNAME_MAX_LENGTH {
            return Err(ValidationError::too_long("username", USERNAME_MAX_LENGTH));
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// User as seen by the content schema.
///
/// ## Invariants
/// - `id` is a valid UUID.
/// - `username` is non-blank and at most [`USERNAME_MAX_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: Username,
}

impl User {
    /// Build a [`User`] from validated components.
    pub const fn new(id: UserId, username: Username) -> Self {
        Self { id, username }
    }

    /// Fallible constructor from raw strings.
    pub fn try_from_strings(
        id: impl AsRef<str>,
        username: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::new(UserId::new(id)?, Username::new(username)?))
    }

    /// Stable user identifier.
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Login name.
    pub const fn username(&self) -> &Username {
        &self.username
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.username.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    #[rstest]
    fn parses_canonical_uuid() {
        let id = UserId::new(VALID_ID).expect("valid id");
        assert_eq!(id.to_string(), VALID_ID);
    }

    #[rstest]
    #[case("")]
    #[case("not-a-uuid")]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    fn rejects_malformed_ids(#[case] raw: &str) {
        assert_eq!(UserId::new(raw), Err(ValidationError::InvalidUserId));
    }

    #[rstest]
    fn username_is_bounded() {
        assert!(Username::new("a".repeat(USERNAME_MAX_LENGTH)).is_ok());
        assert_eq!(
            Username::new("a".repeat(USERNAME_MAX_LENGTH + 1)),
            Err(ValidationError::TooLong {
                field: "username",
                max: USERNAME_MAX_LENGTH
            })
        );
        assert_eq!(
            Username::new(" "),
            Err(ValidationError::Empty { field: "username" })
        );
    }

    #[rstest]
    fn user_displays_as_username() {
        let user = User::try_from_strings(VALID_ID, "ada").expect("valid user");
        assert_eq!(user.to_string(), "ada");
    }
}
