//! Blog posts.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::labels::{self, EntityLabels};
use super::{
    Category, CategoryId, ImagePath, LocationId, PUBLISHED_BY_DEFAULT, PostId, Publishable,
    ShortText, UserId,
};

/// Input for inserting a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    /// Headline.
    pub title: ShortText,
    /// Body text.
    pub text: String,
    /// Publication time; a future value schedules the post.
    pub pub_date: DateTime<Utc>,
    /// Optional uploaded image.
    pub image: Option<ImagePath>,
    /// Author; deleting the user deletes the post.
    pub author: UserId,
    /// Optional place; deleting the location clears this field.
    pub location: Option<LocationId>,
    /// Optional category; deleting the category clears this field.
    pub category: Option<CategoryId>,
    /// Initial visibility.
    pub is_published: bool,
}

impl NewPost {
    /// Published post without image, location or category.
    pub fn new(
        title: ShortText,
        text: impl Into<String>,
        pub_date: DateTime<Utc>,
        author: UserId,
    ) -> Self {
        Self {
            title,
            text: text.into(),
            pub_date,
            image: None,
            author,
            location: None,
            category: None,
            is_published: PUBLISHED_BY_DEFAULT,
        }
    }

    /// Attach a category.
    #[must_use]
    pub fn with_category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    /// Attach a location.
    #[must_use]
    pub fn with_location(mut self, location: LocationId) -> Self {
        self.location = Some(location);
        self
    }

    /// Attach an uploaded image.
    #[must_use]
    pub fn with_image(mut self, image: ImagePath) -> Self {
        self.image = Some(image);
        self
    }
}

/// Stored column values used to rebuild a [`Post`].
#[derive(Debug, Clone)]
pub struct PostParts {
    /// Store-assigned identifier.
    pub id: PostId,
    /// Headline.
    pub title: ShortText,
    /// Body text.
    pub text: String,
    /// Publication time.
    pub pub_date: DateTime<Utc>,
    /// Optional uploaded image.
    pub image: Option<ImagePath>,
    /// Author.
    pub author: UserId,
    /// Optional place.
    pub location: Option<LocationId>,
    /// Optional category.
    pub category: Option<CategoryId>,
    /// Visibility flag and creation timestamp.
    pub publishable: Publishable,
}

/// Persisted post.
///
/// ## Invariants
/// - `author` always refers to an existing user; the post is deleted with
///   its author.
/// - `location` and `category` become `None` when the referenced record is
///   deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    id: PostId,
    #[serde(deserialize_with = "crate::domain::short_text::deserialize_title")]
    title: ShortText,
    text: String,
    pub_date: DateTime<Utc>,
    image: Option<ImagePath>,
    author: UserId,
    location: Option<LocationId>,
    category: Option<CategoryId>,
    #[serde(flatten)]
    publishable: Publishable,
}

impl Post {
    /// Verbose names used by presentation layers.
    pub const LABELS: EntityLabels = labels::POST;

    /// Rehydrate a post from stored values.
    pub fn from_parts(parts: PostParts) -> Self {
        let PostParts {
            id,
            title,
            text,
            pub_date,
            image,
            author,
            location,
            category,
            publishable,
        } = parts;
        Self {
            id,
            title,
            text,
            pub_date,
            image,
            author,
            location,
            category,
            publishable,
        }
    }

    /// Store-assigned identifier.
    pub const fn id(&self) -> PostId {
        self.id
    }

    /// Headline.
    pub const fn title(&self) -> &ShortText {
        &self.title
    }

    /// Body text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Publication time.
    pub const fn pub_date(&self) -> DateTime<Utc> {
        self.pub_date
    }

    /// Uploaded image, if any.
    pub const fn image(&self) -> Option<&ImagePath> {
        self.image.as_ref()
    }

    /// Author identifier.
    pub const fn author(&self) -> &UserId {
        &self.author
    }

    /// Location identifier, if any.
    pub const fn location(&self) -> Option<LocationId> {
        self.location
    }

    /// Category identifier, if any.
    pub const fn category(&self) -> Option<CategoryId> {
        self.category
    }

    /// Visibility flag and creation timestamp.
    pub const fn publishable(&self) -> &Publishable {
        &self.publishable
    }

    /// Replace the headline.
    pub fn set_title(&mut self, title: ShortText) {
        self.title = title;
    }

    /// Replace the body.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Move the publication time.
    pub const fn set_pub_date(&mut self, pub_date: DateTime<Utc>) {
        self.pub_date = pub_date;
    }

    /// Replace or clear the image.
    pub fn set_image(&mut self, image: Option<ImagePath>) {
        self.image = image;
    }

    /// Hand the post to another author.
    pub const fn set_author(&mut self, author: UserId) {
        self.author = author;
    }

    /// Replace or clear the location.
    pub const fn set_location(&mut self, location: Option<LocationId>) {
        self.location = location;
    }

    /// Replace or clear the category.
    pub const fn set_category(&mut self, category: Option<CategoryId>) {
        self.category = category;
    }

    /// Show or hide the post.
    pub const fn set_published(&mut self, is_published: bool) {
        self.publishable.set_published(is_published);
    }

    /// Whether a reader should see this post at `instant`.
    ///
    /// A post is visible when it is published, its publication time has
    /// arrived, and it belongs to a published category. `category` must be
    /// the record referenced by [`Post::category`].
    pub fn is_visible_at(&self, instant: DateTime<Utc>, category: Option<&Category>) -> bool {
        self.publishable.is_published()
            && self.pub_date <= instant
            && category.is_some_and(|category| {
                Some(category.id()) == self.category && category.publishable().is_published()
            })
    }

    /// Default listing order: newest `pub_date` first, then highest id.
    ///
    /// # Examples
    /// ```
    /// use blogicum::domain::Post;
    ///
    /// # fn sort(posts: &mut Vec<Post>) {
    /// posts.sort_by(Post::default_order);
    /// # }
    /// ```
    pub fn default_order(left: &Self, right: &Self) -> Ordering {
        right
            .pub_date
            .cmp(&left.pub_date)
            .then_with(|| right.id.cmp(&left.id))
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.title.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CategoryParts, Slug};
    use chrono::{Duration, TimeZone};
    use rstest::{fixture, rstest};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
    }

    fn post(id: i64, pub_date: DateTime<Utc>) -> Post {
        Post::from_parts(PostParts {
            id: PostId::new(id),
            title: ShortText::new("title", format!("post {id}")).expect("valid title"),
            text: "body".to_owned(),
            pub_date,
            image: None,
            author: UserId::random(),
            location: None,
            category: Some(CategoryId::new(1)),
            publishable: Publishable::new(true, at(0)),
        })
    }

    #[fixture]
    fn published_category() -> Category {
        Category::from_parts(CategoryParts {
            id: CategoryId::new(1),
            title: ShortText::new("title", "Travel").expect("valid title"),
            description: String::new(),
            slug: Slug::new("travel").expect("valid slug"),
            publishable: Publishable::new(true, at(0)),
        })
    }

    #[rstest]
    fn displays_as_title() {
        assert_eq!(post(7, at(1)).to_string(), "post 7");
    }

    #[rstest]
    fn default_order_is_newest_first_with_id_tiebreak() {
        let mut posts = vec![post(1, at(1)), post(2, at(3)), post(3, at(2)), post(4, at(3))];
        posts.sort_by(Post::default_order);

        let ids: Vec<i64> = posts.iter().map(|p| p.id().get()).collect();
        assert_eq!(ids, vec![4, 2, 3, 1]);
    }

    #[rstest]
    fn visibility_requires_published_post_in_published_category(published_category: Category) {
        let now = at(12);
        let visible = post(1, now - Duration::minutes(1));
        assert!(visible.is_visible_at(now, Some(&published_category)));

        let scheduled = post(2, now + Duration::minutes(1));
        assert!(!scheduled.is_visible_at(now, Some(&published_category)));

        let mut hidden = post(3, now);
        hidden.set_published(false);
        assert!(!hidden.is_visible_at(now, Some(&published_category)));

        let mut hidden_category = published_category.clone();
        hidden_category.set_published(false);
        assert!(!visible.is_visible_at(now, Some(&hidden_category)));

        let mut uncategorised = post(4, now);
        uncategorised.set_category(None);
        assert!(!uncategorised.is_visible_at(now, None));
    }

    #[rstest]
    fn builder_sets_optional_references() {
        let author = UserId::random();
        let draft = NewPost::new(
            ShortText::new("title", "Draft").expect("valid title"),
            "text",
            at(1),
            author,
        )
        .with_category(CategoryId::new(5))
        .with_location(LocationId::new(6))
        .with_image(ImagePath::for_upload("a.png").expect("valid image"));

        assert_eq!(draft.category, Some(CategoryId::new(5)));
        assert_eq!(draft.location, Some(LocationId::new(6)));
        assert_eq!(draft.image.as_ref().map(AsRef::as_ref), Some("posts_images/a.png"));
        assert!(draft.is_published);
    }
}
