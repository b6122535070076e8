//! Event publisher abstraction.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::event::EventEnvelope;

/// In-process publish/subscribe seam for domain events.
///
/// Publishing is sequential: the caller awaits each publish before moving to
/// the next event, so subscriber failures surface synchronously and ordering
/// within an aggregate's batch is preserved.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Delivers one event envelope to all interested subscribers.
    ///
    /// # Errors
    ///
    /// Propagates the first subscriber failure as a `DomainError`.
    async fn publish(&self, envelope: &EventEnvelope) -> Result<(), DomainError>;
}
