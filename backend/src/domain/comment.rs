//! Reader comments on posts.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::labels::{self, EntityLabels};
use super::{CommentId, PostId, User, UserId};

/// Input for inserting a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    /// Comment body.
    pub text: String,
    /// Commented post; deleting it deletes the comment.
    pub post: PostId,
    /// Author; deleting the user deletes the comment.
    pub author: UserId,
}

impl NewComment {
    /// Comment by `author` on `post`.
    pub fn new(text: impl Into<String>, post: PostId, author: UserId) -> Self {
        Self {
            text: text.into(),
            post,
            author,
        }
    }
}

/// Persisted comment.
///
/// Comments carry their own `created_at` but no visibility flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    id: CommentId,
    text: String,
    post: PostId,
    created_at: DateTime<Utc>,
    author: UserId,
}

impl Comment {
    /// Verbose names used by presentation layers.
    pub const LABELS: EntityLabels = labels::COMMENT;

    /// Rehydrate a comment from stored values.
    pub fn from_parts(
        id: CommentId,
        text: impl Into<String>,
        post: PostId,
        created_at: DateTime<Utc>,
        author: UserId,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            post,
            created_at,
            author,
        }
    }

    /// Store-assigned identifier.
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Comment body.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Commented post.
    pub const fn post(&self) -> PostId {
        self.post
    }

    /// When the comment was inserted.
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Author identifier.
    pub const fn author(&self) -> &UserId {
        &self.author
    }

    /// Edit the body.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Render the comment with the author's username instead of their id.
    ///
    /// # Examples
    /// ```
    /// use blogicum::domain::{Comment, CommentId, PostId, User};
    /// use chrono::Utc;
    ///
    /// let author = User::try_from_strings("3fa85f64-5717-4562-b3fc-2c963f66afa6", "ada")
    ///     .expect("valid user");
    /// let comment = Comment::from_parts(
    ///     CommentId::new(1),
    ///     "Great photos",
    ///     PostId::new(1),
    ///     Utc::now(),
    ///     *author.id(),
    /// );
    /// assert_eq!(comment.display_with(&author).to_string(), "Great photos от ada");
    /// ```
    pub fn display_with<'a>(&'a self, author: &'a User) -> CommentDisplay<'a> {
        CommentDisplay {
            text: &self.text,
            author: AuthorIdentity::Named(author),
        }
    }

    /// Default listing order: oldest first, then lowest id.
    pub fn default_order(left: &Self, right: &Self) -> Ordering {
        left.created_at
            .cmp(&right.created_at)
            .then_with(|| left.id.cmp(&right.id))
    }
}

#[derive(Debug, Clone, Copy)]
enum AuthorIdentity<'a> {
    Id(&'a UserId),
    Named(&'a User),
}

/// Borrowed rendering of a comment with its author.
#[derive(Debug, Clone, Copy)]
pub struct CommentDisplay<'a> {
    text: &'a str,
    author: AuthorIdentity<'a>,
}

impl fmt::Display for CommentDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.author {
            AuthorIdentity::Id(id) => write!(f, "{} от {id}", self.text),
            AuthorIdentity::Named(user) => write!(f, "{} от {user}", self.text),
        }
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        CommentDisplay {
            text: &self.text,
            author: AuthorIdentity::Id(&self.author),
        }
        .fmt(f)
    }
}
