//! Content schema: entities, value types and repository ports.
//!
//! Purpose: Define the strongly typed records of the blog (posts,
//! categories, locations, comments) and the ports adapters implement to
//! persist them. Field-level validation lives in value-type constructors;
//! store constraints (uniqueness, cascades) are enforced by adapters.
//!
//! Public surface:
//! - `Post`, `Category`, `Location`, `Comment` and their `New*` inputs.
//! - `Publishable`: visibility flag and creation timestamp field group.
//! - `ShortText`, `Slug`, `ImagePath`, `UserId`, `Username`: validated values.
//! - `ValidationError`: field-level validation failures.

mod category;
mod comment;
mod error;
mod ids;
mod image_path;
pub mod labels;
mod location;
pub mod ports;
mod post;
mod publishable;
mod short_text;
mod slug;
mod user;

pub use self::category::{Category, CategoryParts, NewCategory};
pub use self::comment::{Comment, CommentDisplay, NewComment};
pub use self::error::ValidationError;
pub use self::ids::{CategoryId, CommentId, LocationId, PostId};
pub use self::image_path::{IMAGE_PATH_MAX_LENGTH, ImagePath, POST_IMAGES_DIR};
pub use self::labels::{EntityLabels, FieldLabel};
pub use self::location::{Location, NewLocation};
pub use self::post::{NewPost, Post, PostParts};
pub use self::publishable::{PUBLISHED_BY_DEFAULT, Publishable};
pub use self::short_text::{DEFAULT_MAX_LENGTH, ShortText};
pub use self::slug::{SLUG_MAX_LENGTH, Slug};
pub use self::user::{USERNAME_MAX_LENGTH, User, UserId, Username};
