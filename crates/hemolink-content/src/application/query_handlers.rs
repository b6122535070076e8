//! Query handlers for the Content context.

use chrono::{DateTime, Utc};
use hemolink_core::error::DomainError;
use serde::Serialize;

use crate::domain::aggregates::Post;
use crate::domain::repository::PostRepository;

/// Read-only view of a post.
#[derive(Debug, Serialize)]
pub struct PostView {
    /// The post identifier.
    pub post_id: i64,
    /// The authoring user.
    pub author_id: i64,
    /// Post title.
    pub title: String,
    /// URL slug.
    pub slug: String,
    /// Post body.
    pub body: String,
    /// Lifecycle status ("DRAFT", "PUBLISHED", "ARCHIVED").
    pub status: &'static str,
    /// When the post went live, if it ever did.
    pub published_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&Post> for PostView {
    fn from(post: &Post) -> Self {
        Self {
            post_id: post.id,
            author_id: post.author_id,
            title: post.title.clone(),
            slug: post.slug.clone(),
            body: post.body.clone(),
            status: post.status().as_str(),
            published_at: post.published_at,
            created_at: post.created_at,
        }
    }
}

/// Retrieves a post by id.
///
/// # Errors
///
/// Returns `DomainError::NotFound` when the post does not exist.
pub async fn get_post_by_id(
    post_id: i64,
    repo: &dyn PostRepository,
) -> Result<PostView, DomainError> {
    let post = repo.find_by_id(post_id).await?.ok_or(DomainError::NotFound {
        entity: "post",
        id: post_id,
    })?;
    Ok(PostView::from(&post))
}

/// Retrieves a post by slug.
///
/// # Errors
///
/// Returns `DomainError::NotFound` when no post claims the slug. The id in
/// the error is zero since the lookup key is the slug itself.
pub async fn get_post_by_slug(
    slug: &str,
    repo: &dyn PostRepository,
) -> Result<PostView, DomainError> {
    let post = repo
        .find_by_slug(slug)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "post",
            id: 0,
        })?;
    Ok(PostView::from(&post))
}
