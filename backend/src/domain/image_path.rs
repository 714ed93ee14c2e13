//! Opaque handles to uploaded post images.
//!
//! The file itself lives in an external storage collaborator. The schema only
//! keeps the path relative to the upload root.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Directory under the upload root that receives post images.
pub const POST_IMAGES_DIR: &str = "posts_images";

/// Maximum stored path length in characters.
pub const IMAGE_PATH_MAX_LENGTH: usize = 100;

/// Relative path of an uploaded image.
///
/// ## Invariants
/// - Non-empty, relative (no leading `/`), and free of `..` segments.
/// - At most [`IMAGE_PATH_MAX_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImagePath(String);

impl ImagePath {
    /// Validate an existing stored path.
    pub fn new(path: impl Into<String>) -> Result<Self, ValidationError> {
        Self::from_owned(path.into())
    }

    fn from_owned(path: String) -> Result<Self, ValidationError> {
        if path.trim().is_empty() {
            return Err(ValidationError::empty("image"));
        }
        if path.chars().count() > IMAGE_PATH_MAX_LENGTH {
            return Err(ValidationError::too_long("image", IMAGE_PATH_MAX_LENGTH));
        }
        let escapes_root = path.starts_with('/')
            || path.starts_with('\\')
            || path.split(['/', '\\']).any(|segment| segment == "..");
        if escapes_root {
            return Err(ValidationError::InvalidImagePath { path });
        }
        Ok(Self(path))
    }

    /// Path for a freshly uploaded file named `file_name`.
    ///
    /// # Examples
    /// ```
    /// use blogicum::domain::ImagePath;
    ///
    /// let path = ImagePath::for_upload("sunrise.jpg").expect("valid name");
    /// assert_eq!(path.as_ref(), "posts_images/sunrise.jpg");
    /// ```
    pub fn for_upload(file_name: &str) -> Result<Self, ValidationError> {
        if file_name.trim().is_empty() {
            return Err(ValidationError::empty("image"));
        }
        if file_name.contains(['/', '\\']) {
            return Err(ValidationError::InvalidImagePath {
                path: file_name.to_owned(),
            });
        }
        Self::new(format!("{POST_IMAGES_DIR}/{file_name}"))
    }
}

impl AsRef<str> for ImagePath {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ImagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ImagePath> for String {
    fn from(value: ImagePath) -> Self {
        value.0
    }
}

impl TryFrom<String> for ImagePath {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}
