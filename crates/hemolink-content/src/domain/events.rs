//! Domain events for the Content context.

use chrono::{DateTime, Utc};
use hemolink_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

/// Event type name for `PostDrafted`.
pub const POST_DRAFTED_EVENT_TYPE: &str = "post.drafted";
/// Event type name for `PostPublished`.
pub const POST_PUBLISHED_EVENT_TYPE: &str = "post.published";
/// Event type name for `PostArchived`.
pub const POST_ARCHIVED_EVENT_TYPE: &str = "post.archived";

/// Emitted when a new post is drafted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDrafted {
    /// The post identifier.
    pub post_id: i64,
    /// The authoring user.
    pub author_id: i64,
    /// The claimed slug.
    pub slug: String,
}

/// Emitted when a draft goes live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPublished {
    /// The post identifier.
    pub post_id: i64,
    /// The claimed slug.
    pub slug: String,
    /// When the post went live.
    pub published_at: DateTime<Utc>,
}

/// Emitted when a published post is taken down.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostArchived {
    /// The post identifier.
    pub post_id: i64,
    /// The claimed slug.
    pub slug: String,
}

/// Event payload variants for the Content context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PostEventKind {
    /// A new post was drafted.
    Drafted(PostDrafted),
    /// A draft went live.
    Published(PostPublished),
    /// A published post was taken down.
    Archived(PostArchived),
}

/// Domain event envelope for the Content context.
#[derive(Debug, Clone)]
pub struct PostEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: PostEventKind,
}

impl DomainEvent for PostEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            PostEventKind::Drafted(_) => POST_DRAFTED_EVENT_TYPE,
            PostEventKind::Published(_) => POST_PUBLISHED_EVENT_TYPE,
            PostEventKind::Archived(_) => POST_ARCHIVED_EVENT_TYPE,
        }
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("PostEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
