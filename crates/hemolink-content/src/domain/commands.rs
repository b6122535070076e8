//! Commands for the Content context.

use hemolink_core::command::Command;
use uuid::Uuid;

/// Command to draft a new post.
#[derive(Debug, Clone)]
pub struct DraftPost {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The authoring user.
    pub author_id: i64,
    /// Post title.
    pub title: String,
    /// URL slug to claim.
    pub slug: String,
    /// Post body.
    pub body: String,
}

impl Command for DraftPost {
    fn command_type(&self) -> &'static str {
        "content.draft_post"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to take a draft live.
#[derive(Debug, Clone)]
pub struct PublishPost {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The post identifier.
    pub post_id: i64,
}

impl Command for PublishPost {
    fn command_type(&self) -> &'static str {
        "content.publish_post"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to take a published post down.
#[derive(Debug, Clone)]
pub struct ArchivePost {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The post identifier.
    pub post_id: i64,
}

impl Command for ArchivePost {
    fn command_type(&self) -> &'static str {
        "content.archive_post"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
