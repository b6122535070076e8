//! Repository abstraction for the Content context.

use async_trait::async_trait;
use hemolink_core::error::DomainError;

use super::aggregates::Post;

/// State repository for posts.
///
/// The pending-event buffer is not part of persisted state; implementations
/// store and return aggregates with an empty buffer.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Allocates the next surrogate key.
    async fn next_id(&self) -> Result<i64, DomainError>;

    /// Loads a post by id, or `None` when it does not exist.
    async fn find_by_id(&self, post_id: i64) -> Result<Option<Post>, DomainError>;

    /// Loads a post by slug, or `None` when it does not exist.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, DomainError>;

    /// Returns true when a post already claims the slug.
    async fn slug_exists(&self, slug: &str) -> Result<bool, DomainError>;

    /// Persists a newly drafted post.
    async fn insert(&self, post: &Post) -> Result<(), DomainError>;

    /// Persists the current state of an existing post.
    async fn update(&self, post: &Post) -> Result<(), DomainError>;
}
