//! Process-local content store implementing every repository port.
//!
//! `InMemoryContentStore` mirrors the relational rules of the PostgreSQL
//! schema: foreign keys are checked on write, the category slug is unique,
//! and deletes cascade or detach exactly as the `ON DELETE` clauses do. It
//! reports violations with the same constraint names as the Diesel adapters,
//! so code written against the ports behaves identically on both.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{
    CategoryRepository, CommentRepository, LocationRepository, PersistenceError, PostQuery,
    PostRepository, PostScope, UserRepository, constraint,
};
use crate::domain::{
    Category, CategoryId, CategoryParts, Comment, CommentId, Location, LocationId, NewCategory,
    NewComment, NewLocation, NewPost, Post, PostId, PostParts, Publishable, Slug, User, UserId,
};

#[derive(Default)]
struct ContentState {
    users: BTreeMap<UserId, User>,
    locations: BTreeMap<LocationId, Location>,
    categories: BTreeMap<CategoryId, Category>,
    posts: BTreeMap<PostId, Post>,
    comments: BTreeMap<CommentId, Comment>,
    last_id: i64,
}

impl ContentState {
    /// Identifiers are drawn from one sequence shared by all tables.
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn check_slug_free(
        &self,
        slug: &Slug,
        except: Option<CategoryId>,
    ) -> Result<(), PersistenceError> {
        let taken = self
            .categories
            .values()
            .any(|category| category.slug() == slug && Some(category.id()) != except);
        if taken {
            return Err(PersistenceError::unique_violation(
                constraint::CATEGORY_SLUG_UNIQUE,
            ));
        }
        Ok(())
    }

    fn check_post_references(
        &self,
        author: &UserId,
        location: Option<LocationId>,
        category: Option<CategoryId>,
    ) -> Result<(), PersistenceError> {
        if !self.users.contains_key(author) {
            return Err(PersistenceError::foreign_key_violation(
                constraint::POST_AUTHOR_FK,
            ));
        }
        if location.is_some_and(|id| !self.locations.contains_key(&id)) {
            return Err(PersistenceError::foreign_key_violation(
                constraint::POST_LOCATION_FK,
            ));
        }
        if category.is_some_and(|id| !self.categories.contains_key(&id)) {
            return Err(PersistenceError::foreign_key_violation(
                constraint::POST_CATEGORY_FK,
            ));
        }
        Ok(())
    }

    fn check_comment_references(
        &self,
        post: PostId,
        author: &UserId,
    ) -> Result<(), PersistenceError> {
        if !self.posts.contains_key(&post) {
            return Err(PersistenceError::foreign_key_violation(
                constraint::COMMENT_POST_FK,
            ));
        }
        if !self.users.contains_key(author) {
            return Err(PersistenceError::foreign_key_violation(
                constraint::COMMENT_AUTHOR_FK,
            ));
        }
        Ok(())
    }

    fn remove_post(&mut self, id: PostId) -> bool {
        if self.posts.remove(&id).is_none() {
            return false;
        }
        self.comments.retain(|_, comment| comment.post() != id);
        true
    }

    fn remove_user(&mut self, id: &UserId) -> bool {
        if self.users.remove(id).is_none() {
            return false;
        }
        let authored: Vec<PostId> = self
            .posts
            .values()
            .filter(|post| post.author() == id)
            .map(Post::id)
            .collect();
        for post in &authored {
            self.remove_post(*post);
        }
        self.comments.retain(|_, comment| comment.author() != id);
        debug!(user_id = %id, posts = authored.len(), "cascaded user deletion");
        true
    }

    fn matches_query(&self, post: &Post, query: &PostQuery) -> bool {
        let in_scope = match query.scope {
            PostScope::All => true,
            PostScope::Author(author) => *post.author() == author,
            PostScope::Category(category) => post.category() == Some(category),
            PostScope::Location(location) => post.location() == Some(location),
        };
        in_scope
            && query.visible_at.is_none_or(|instant| {
                let category = post.category().and_then(|id| self.categories.get(&id));
                post.is_visible_at(instant, category)
            })
    }
}

fn not_found(entity: &str, id: impl std::fmt::Display) -> PersistenceError {
    PersistenceError::not_found(format!("{entity} {id}"))
}

/// Keep the stored creation time while taking every mutable field.
fn restamp(incoming: &Publishable, stored: &Publishable) -> Publishable {
    Publishable::new(incoming.is_published(), stored.created_at())
}

/// In-memory implementation of all content repository ports.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use blogicum::domain::{NewLocation, ShortText};
/// use blogicum::domain::ports::LocationRepository;
/// use blogicum::outbound::memory::InMemoryContentStore;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let store = InMemoryContentStore::new(Arc::new(mockable::DefaultClock));
/// let name = ShortText::new("name", "Казань").unwrap();
/// let location = store.create(NewLocation::new(name)).await.unwrap();
/// assert_eq!(location.to_string(), "Казань");
/// # });
/// ```
#[derive(Clone)]
pub struct InMemoryContentStore {
    state: Arc<Mutex<ContentState>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryContentStore {
    /// Create an empty store that stamps `created_at` from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ContentState::default())),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, ContentState>, PersistenceError> {
        self.state
            .lock()
            .map_err(|_| PersistenceError::connection("content store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryContentStore {
    async fn upsert(&self, user: &User) -> Result<(), PersistenceError> {
        let mut state = self.lock()?;
        state.users.insert(*user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, PersistenceError> {
        Ok(self.lock()?.users.get(id).cloned())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, PersistenceError> {
        Ok(self.lock()?.remove_user(id))
    }
}

#[async_trait]
impl LocationRepository for InMemoryContentStore {
    async fn create(&self, location: NewLocation) -> Result<Location, PersistenceError> {
        let mut state = self.lock()?;
        let id = LocationId::new(state.next_id());
        let stored = Location::from_parts(
            id,
            location.name,
            Publishable::new(location.is_published, self.clock.utc()),
        );
        state.locations.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, location: &Location) -> Result<(), PersistenceError> {
        let mut state = self.lock()?;
        let stored = state
            .locations
            .get_mut(&location.id())
            .ok_or_else(|| not_found("location", location.id()))?;
        *stored = Location::from_parts(
            location.id(),
            location.name().clone(),
            restamp(location.publishable(), stored.publishable()),
        );
        Ok(())
    }

    async fn find_by_id(&self, id: LocationId) -> Result<Option<Location>, PersistenceError> {
        Ok(self.lock()?.locations.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Location>, PersistenceError> {
        Ok(self.lock()?.locations.values().cloned().collect())
    }

    async fn delete(&self, id: LocationId) -> Result<bool, PersistenceError> {
        let mut state = self.lock()?;
        if state.locations.remove(&id).is_none() {
            return Ok(false);
        }
        for post in state.posts.values_mut() {
            if post.location() == Some(id) {
                post.set_location(None);
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryContentStore {
    async fn create(&self, category: NewCategory) -> Result<Category, PersistenceError> {
        let mut state = self.lock()?;
        state.check_slug_free(&category.slug, None)?;
        let id = CategoryId::new(state.next_id());
        let stored = Category::from_parts(CategoryParts {
            id,
            title: category.title,
            description: category.description,
            slug: category.slug,
            publishable: Publishable::new(category.is_published, self.clock.utc()),
        });
        state.categories.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, category: &Category) -> Result<(), PersistenceError> {
        let mut state = self.lock()?;
        let created = state
            .categories
            .get(&category.id())
            .map(|stored| *stored.publishable())
            .ok_or_else(|| not_found("category", category.id()))?;
        state.check_slug_free(category.slug(), Some(category.id()))?;
        state.categories.insert(
            category.id(),
            Category::from_parts(CategoryParts {
                id: category.id(),
                title: category.title().clone(),
                description: category.description().to_owned(),
                slug: category.slug().clone(),
                publishable: restamp(category.publishable(), &created),
            }),
        );
        Ok(())
    }

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, PersistenceError> {
        Ok(self.lock()?.categories.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Category>, PersistenceError> {
        Ok(self
            .lock()?
            .categories
            .values()
            .find(|category| category.slug() == slug)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Category>, PersistenceError> {
        Ok(self.lock()?.categories.values().cloned().collect())
    }

    async fn delete(&self, id: CategoryId) -> Result<bool, PersistenceError> {
        let mut state = self.lock()?;
        if state.categories.remove(&id).is_none() {
            return Ok(false);
        }
        for post in state.posts.values_mut() {
            if post.category() == Some(id) {
                post.set_category(None);
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl PostRepository for InMemoryContentStore {
    async fn create(&self, post: NewPost) -> Result<Post, PersistenceError> {
        let mut state = self.lock()?;
        state.check_post_references(&post.author, post.location, post.category)?;
        let id = PostId::new(state.next_id());
        let stored = Post::from_parts(PostParts {
            id,
            title: post.title,
            text: post.text,
            pub_date: post.pub_date,
            image: post.image,
            author: post.author,
            location: post.location,
            category: post.category,
            publishable: Publishable::new(post.is_published, self.clock.utc()),
        });
        state.posts.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, post: &Post) -> Result<(), PersistenceError> {
        let mut state = self.lock()?;
        let created = state
            .posts
            .get(&post.id())
            .map(|stored| *stored.publishable())
            .ok_or_else(|| not_found("post", post.id()))?;
        state.check_post_references(post.author(), post.location(), post.category())?;
        state.posts.insert(
            post.id(),
            Post::from_parts(PostParts {
                id: post.id(),
                title: post.title().clone(),
                text: post.text().to_owned(),
                pub_date: post.pub_date(),
                image: post.image().cloned(),
                author: *post.author(),
                location: post.location(),
                category: post.category(),
                publishable: restamp(post.publishable(), &created),
            }),
        );
        Ok(())
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PersistenceError> {
        Ok(self.lock()?.posts.get(&id).cloned())
    }

    async fn list(&self, query: PostQuery) -> Result<Vec<Post>, PersistenceError> {
        let state = self.lock()?;
        let mut posts: Vec<Post> = state
            .posts
            .values()
            .filter(|post| state.matches_query(post, &query))
            .cloned()
            .collect();
        posts.sort_by(Post::default_order);
        Ok(posts)
    }

    async fn delete(&self, id: PostId) -> Result<bool, PersistenceError> {
        Ok(self.lock()?.remove_post(id))
    }

    async fn comment_count(&self, post: PostId) -> Result<u64, PersistenceError> {
        let state = self.lock()?;
        let count = state
            .comments
            .values()
            .filter(|comment| comment.post() == post)
            .count();
        u64::try_from(count).map_err(|_| PersistenceError::query("comment count overflow"))
    }
}

#[async_trait]
impl CommentRepository for InMemoryContentStore {
    async fn create(&self, comment: NewComment) -> Result<Comment, PersistenceError> {
        let mut state = self.lock()?;
        state.check_comment_references(comment.post, &comment.author)?;
        let id = CommentId::new(state.next_id());
        let stored = Comment::from_parts(
            id,
            comment.text,
            comment.post,
            self.clock.utc(),
            comment.author,
        );
        state.comments.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, comment: &Comment) -> Result<(), PersistenceError> {
        let mut state = self.lock()?;
        let stored = state
            .comments
            .get_mut(&comment.id())
            .ok_or_else(|| not_found("comment", comment.id()))?;
        stored.set_text(comment.text());
        Ok(())
    }

    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, PersistenceError> {
        Ok(self.lock()?.comments.get(&id).cloned())
    }

    async fn list_for_post(&self, post: PostId) -> Result<Vec<Comment>, PersistenceError> {
        let state = self.lock()?;
        let mut comments: Vec<Comment> = state
            .comments
            .values()
            .filter(|comment| comment.post() == post)
            .cloned()
            .collect();
        comments.sort_by(Comment::default_order);
        Ok(comments)
    }

    async fn delete(&self, id: CommentId) -> Result<bool, PersistenceError> {
        Ok(self.lock()?.comments.remove(&id).is_some())
    }
}
