//! Business rules for the Content context.

use hemolink_core::rule::BusinessRule;

use super::aggregates::PostStatus;

/// A slug may only be claimed once across all posts.
///
/// The existence check is injected so the rule stays synchronous; callers
/// resolve it against the repository before constructing the rule.
pub struct SlugMustBeUnique<F>
where
    F: Fn(&str) -> bool,
{
    /// The candidate slug.
    pub slug: String,
    /// Returns true when the slug is already taken.
    pub slug_exists: F,
}

impl<F> BusinessRule for SlugMustBeUnique<F>
where
    F: Fn(&str) -> bool,
{
    fn message(&self) -> String {
        format!("slug '{}' is already in use", self.slug)
    }

    fn is_broken(&self) -> bool {
        (self.slug_exists)(&self.slug)
    }
}

/// A post may only be published while it is still a draft.
#[derive(Debug, Clone, Copy)]
pub struct PostCanBePublished {
    /// Current post status.
    pub status: PostStatus,
}

impl BusinessRule for PostCanBePublished {
    fn message(&self) -> String {
        "only a draft post can be published".to_string()
    }

    fn is_broken(&self) -> bool {
        self.status != PostStatus::Draft
    }
}

/// A post may only be archived after it has been published.
#[derive(Debug, Clone, Copy)]
pub struct PostCanBeArchived {
    /// Current post status.
    pub status: PostStatus,
}

impl BusinessRule for PostCanBeArchived {
    fn message(&self) -> String {
        "only a published post can be archived".to_string()
    }

    fn is_broken(&self) -> bool {
        self.status != PostStatus::Published
    }
}
