//! Command handlers for the Content context.
//!
//! The slug uniqueness check is resolved against the repository up front,
//! then handed to the aggregate factory as a plain closure.

use hemolink_core::clock::Clock;
use hemolink_core::error::DomainError;
use hemolink_core::publisher::EventPublisher;
use hemolink_dispatch::drain_and_publish;

use crate::domain::aggregates::{Post, PostStatus};
use crate::domain::commands::{ArchivePost, DraftPost, PublishPost};
use crate::domain::repository::PostRepository;

/// Result of a successfully handled content command.
#[derive(Debug)]
pub struct PostCommandResult {
    /// The post affected by the command.
    pub post_id: i64,
    /// The post status after the command.
    pub status: PostStatus,
    /// How many domain events were published.
    pub events_published: usize,
}

async fn load(repo: &dyn PostRepository, post_id: i64) -> Result<Post, DomainError> {
    repo.find_by_id(post_id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "post",
            id: post_id,
        })
}

/// Handles `DraftPost`: checks the slug, allocates an id, constructs the
/// aggregate, persists it, and publishes the drafted event.
///
/// # Errors
///
/// Returns `DomainError::Validation` for a blank title or malformed slug,
/// `RuleViolation` for a taken slug, or a persistence/publish failure.
pub async fn handle_draft_post(
    command: &DraftPost,
    repo: &dyn PostRepository,
    publisher: &dyn EventPublisher,
    clock: &dyn Clock,
) -> Result<PostCommandResult, DomainError> {
    let slug_taken = repo.slug_exists(&command.slug).await?;
    let post_id = repo.next_id().await?;
    let mut post = Post::draft(
        post_id,
        command.author_id,
        command.title.clone(),
        command.slug.clone(),
        command.body.clone(),
        |_| slug_taken,
        command.correlation_id,
        clock,
    )?;

    repo.insert(&post).await?;
    let events_published = drain_and_publish(&mut post, publisher).await?;

    Ok(PostCommandResult {
        post_id,
        status: post.status(),
        events_published,
    })
}

/// Handles `PublishPost`.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown post, `RuleViolation`
/// when the post is not DRAFT, or a persistence/publish failure.
pub async fn handle_publish_post(
    command: &PublishPost,
    repo: &dyn PostRepository,
    publisher: &dyn EventPublisher,
    clock: &dyn Clock,
) -> Result<PostCommandResult, DomainError> {
    let mut post = load(repo, command.post_id).await?;
    post.publish(command.correlation_id, clock)?;

    repo.update(&post).await?;
    let events_published = drain_and_publish(&mut post, publisher).await?;

    Ok(PostCommandResult {
        post_id: command.post_id,
        status: post.status(),
        events_published,
    })
}

/// Handles `ArchivePost`.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown post, `RuleViolation`
/// when the post is not PUBLISHED, or a persistence/publish failure.
pub async fn handle_archive_post(
    command: &ArchivePost,
    repo: &dyn PostRepository,
    publisher: &dyn EventPublisher,
    clock: &dyn Clock,
) -> Result<PostCommandResult, DomainError> {
    let mut post = load(repo, command.post_id).await?;
    post.archive(command.correlation_id, clock)?;

    repo.update(&post).await?;
    let events_published = drain_and_publish(&mut post, publisher).await?;

    Ok(PostCommandResult {
        post_id: command.post_id,
        status: post.status(),
        events_published,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicI64, Ordering};

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use hemolink_core::aggregate::AggregateRoot;
    use hemolink_test_support::{FixedClock, RecordingPublisher};
    use uuid::Uuid;

    use super::*;

    #[derive(Default)]
    struct InMemoryPosts {
        rows: Mutex<HashMap<i64, Post>>,
        next: AtomicI64,
    }

    #[async_trait]
    impl PostRepository for InMemoryPosts {
        async fn next_id(&self) -> Result<i64, DomainError> {
            Ok(self.next.fetch_add(1, Ordering::SeqCst) + 1)
        }

        async fn find_by_id(&self, post_id: i64) -> Result<Option<Post>, DomainError> {
            Ok(self.rows.lock().unwrap().get(&post_id).cloned())
        }

        async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, DomainError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .find(|p| p.slug == slug)
                .cloned())
        }

        async fn slug_exists(&self, slug: &str) -> Result<bool, DomainError> {
            Ok(self.rows.lock().unwrap().values().any(|p| p.slug == slug))
        }

        async fn insert(&self, post: &Post) -> Result<(), DomainError> {
            let mut stored = post.clone();
            stored.clear_events();
            self.rows.lock().unwrap().insert(stored.id, stored);
            Ok(())
        }

        async fn update(&self, post: &Post) -> Result<(), DomainError> {
            self.insert(post).await
        }
    }

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 2, 10, 8, 30, 0).unwrap())
    }

    fn draft_command(slug: &str) -> DraftPost {
        DraftPost {
            correlation_id: Uuid::new_v4(),
            author_id: 42,
            title: "March blood drive".to_string(),
            slug: slug.to_string(),
            body: "Join us at the community center.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_draft_persists_and_publishes() {
        // Arrange
        let repo = InMemoryPosts::default();
        let publisher = RecordingPublisher::new();
        let clock = clock();

        // Act
        let result = handle_draft_post(&draft_command("march-blood-drive"), &repo, &publisher, &clock)
            .await
            .unwrap();

        // Assert
        assert_eq!(result.status, PostStatus::Draft);
        assert_eq!(result.events_published, 1);
        let stored = repo.find_by_id(result.post_id).await.unwrap().unwrap();
        assert!(stored.pending_events().is_empty());
        assert_eq!(publisher.published_events()[0].event_type(), "post.drafted");
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_rule_violation() {
        let repo = InMemoryPosts::default();
        let publisher = RecordingPublisher::new();
        let clock = clock();
        handle_draft_post(&draft_command("same-slug"), &repo, &publisher, &clock)
            .await
            .unwrap();

        let result = handle_draft_post(&draft_command("same-slug"), &repo, &publisher, &clock).await;

        assert!(matches!(result, Err(DomainError::RuleViolation(_))));
        assert_eq!(publisher.published_events().len(), 1);
    }

    #[tokio::test]
    async fn test_publish_then_archive_round_trip() {
        let repo = InMemoryPosts::default();
        let publisher = RecordingPublisher::new();
        let clock = clock();
        let drafted = handle_draft_post(&draft_command("lifecycle-post"), &repo, &publisher, &clock)
            .await
            .unwrap();

        let published = handle_publish_post(
            &PublishPost {
                correlation_id: Uuid::new_v4(),
                post_id: drafted.post_id,
            },
            &repo,
            &publisher,
            &clock,
        )
        .await
        .unwrap();
        assert_eq!(published.status, PostStatus::Published);

        let archived = handle_archive_post(
            &ArchivePost {
                correlation_id: Uuid::new_v4(),
                post_id: drafted.post_id,
            },
            &repo,
            &publisher,
            &clock,
        )
        .await
        .unwrap();
        assert_eq!(archived.status, PostStatus::Archived);

        let types: Vec<String> = publisher
            .published_events()
            .iter()
            .map(|e| e.event_type().to_string())
            .collect();
        assert_eq!(types, vec!["post.drafted", "post.published", "post.archived"]);
    }

    #[tokio::test]
    async fn test_publish_unknown_post_is_not_found() {
        let repo = InMemoryPosts::default();
        let publisher = RecordingPublisher::new();
        let clock = clock();

        let result = handle_publish_post(
            &PublishPost {
                correlation_id: Uuid::new_v4(),
                post_id: 7,
            },
            &repo,
            &publisher,
            &clock,
        )
        .await;

        match result.unwrap_err() {
            DomainError::NotFound { entity, id } => {
                assert_eq!(entity, "post");
                assert_eq!(id, 7);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
