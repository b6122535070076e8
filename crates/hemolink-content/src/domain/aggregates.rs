//! The Post aggregate.

use chrono::{DateTime, Utc};
use hemolink_core::aggregate::AggregateRoot;
use hemolink_core::clock::Clock;
use hemolink_core::error::DomainError;
use hemolink_core::event::{DomainEvent, EventMetadata};
use hemolink_core::rule::check_rule;
use uuid::Uuid;

use super::events::{PostArchived, PostDrafted, PostEvent, PostEventKind, PostPublished};
use super::rules::{PostCanBeArchived, PostCanBePublished, SlugMustBeUnique};

/// Lifecycle status of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostStatus {
    /// Written but not yet visible.
    Draft,
    /// Live on the site.
    Published,
    /// Taken down. Terminal.
    Archived,
}

impl PostStatus {
    /// Returns the storage representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Published => "PUBLISHED",
            Self::Archived => "ARCHIVED",
        }
    }
}

impl std::str::FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(Self::Draft),
            "PUBLISHED" => Ok(Self::Published),
            "ARCHIVED" => Ok(Self::Archived),
            other => Err(DomainError::Validation(format!(
                "unknown post status: {other}"
            ))),
        }
    }
}

fn validate_slug(slug: &str) -> Result<(), DomainError> {
    let well_formed = !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !slug.contains("--");
    if well_formed {
        Ok(())
    } else {
        Err(DomainError::Validation(format!(
            "malformed slug: '{slug}'"
        )))
    }
}

/// An editorial post: DRAFT → PUBLISHED → ARCHIVED.
#[derive(Debug, Clone)]
pub struct Post {
    /// Aggregate identifier.
    pub id: i64,
    /// The authoring user.
    pub author_id: i64,
    /// Post title.
    pub title: String,
    /// URL slug. Unique across all posts.
    pub slug: String,
    /// Post body.
    pub body: String,
    /// Current lifecycle status.
    pub(crate) status: PostStatus,
    /// When the post went live, if it ever did.
    pub published_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: Option<DateTime<Utc>>,
    pending_events: Vec<PostEvent>,
}

impl Post {
    /// Drafts a new post, claiming its slug.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for a blank title or malformed
    /// slug, `RuleViolation` when the slug is already taken.
    #[allow(clippy::too_many_arguments)]
    pub fn draft<F>(
        id: i64,
        author_id: i64,
        title: String,
        slug: String,
        body: String,
        slug_exists: F,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> bool,
    {
        if title.trim().is_empty() {
            return Err(DomainError::Validation(
                "post title must not be blank".to_string(),
            ));
        }
        validate_slug(&slug)?;
        check_rule(&SlugMustBeUnique {
            slug: slug.clone(),
            slug_exists,
        })?;

        let mut post = Self {
            id,
            author_id,
            title,
            slug,
            body,
            status: PostStatus::Draft,
            published_at: None,
            created_at: clock.now(),
            updated_at: None,
            pending_events: Vec::new(),
        };
        post.push_event(
            PostEventKind::Drafted(PostDrafted {
                post_id: id,
                author_id,
                slug: post.slug.clone(),
            }),
            correlation_id,
            clock,
        );
        Ok(post)
    }

    /// Reconstructs a post from stored state. No rules run and no events
    /// are buffered.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn rehydrate(
        id: i64,
        author_id: i64,
        title: String,
        slug: String,
        body: String,
        status: PostStatus,
        published_at: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            author_id,
            title,
            slug,
            body,
            status,
            published_at,
            created_at,
            updated_at,
            pending_events: Vec::new(),
        }
    }

    /// Returns the current lifecycle status.
    #[must_use]
    pub fn status(&self) -> PostStatus {
        self.status
    }

    /// Takes the post live.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RuleViolation` unless the post is DRAFT.
    pub fn publish(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        check_rule(&PostCanBePublished {
            status: self.status,
        })?;

        let now = clock.now();
        self.status = PostStatus::Published;
        self.published_at = Some(now);
        self.updated_at = Some(now);
        self.push_event(
            PostEventKind::Published(PostPublished {
                post_id: self.id,
                slug: self.slug.clone(),
                published_at: now,
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Takes the post down.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RuleViolation` unless the post is PUBLISHED.
    pub fn archive(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        check_rule(&PostCanBeArchived {
            status: self.status,
        })?;

        self.status = PostStatus::Archived;
        self.updated_at = Some(clock.now());
        self.push_event(
            PostEventKind::Archived(PostArchived {
                post_id: self.id,
                slug: self.slug.clone(),
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    fn push_event(&mut self, kind: PostEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        let mut event = PostEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: String::new(),
                aggregate_id: self.id,
                correlation_id,
                causation_id: correlation_id,
                occurred_at: clock.now(),
            },
            kind,
        };
        event.metadata.event_type = event.event_type().to_owned();
        self.pending_events.push(event);
    }
}

impl AggregateRoot for Post {
    type Event = PostEvent;

    fn aggregate_id(&self) -> i64 {
        self.id
    }

    fn pending_events(&self) -> &[PostEvent] {
        &self.pending_events
    }

    fn take_events(&mut self) -> Vec<PostEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn clear_events(&mut self) {
        self.pending_events.clear();
    }
}
