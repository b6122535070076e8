//! In-process publisher with an ordered handler registry.

use std::sync::Arc;

use async_trait::async_trait;
use hemolink_core::error::DomainError;
use hemolink_core::event::EventEnvelope;
use hemolink_core::publisher::EventPublisher;

/// A subscriber reacting to published domain events.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Returns true when this handler wants the given event type.
    fn wants(&self, event_type: &str) -> bool;

    /// Reacts to one event envelope.
    ///
    /// # Errors
    ///
    /// A handler failure propagates out of the publish call and surfaces
    /// from the command handler that triggered the flush.
    async fn handle(&self, envelope: &EventEnvelope) -> Result<(), DomainError>;
}

/// An `EventPublisher` that delivers each envelope to its registered
/// handlers in registration order, awaiting each handler before the next.
#[derive(Default)]
pub struct InProcessPublisher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl InProcessPublisher {
    /// Create a publisher with no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler. Handlers run in registration order.
    #[must_use]
    pub fn with_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.handlers.push(handler);
        self
    }
}

impl std::fmt::Debug for InProcessPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InProcessPublisher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[async_trait]
impl EventPublisher for InProcessPublisher {
    async fn publish(&self, envelope: &EventEnvelope) -> Result<(), DomainError> {
        for handler in &self.handlers {
            if handler.wants(envelope.event_type()) {
                handler.handle(envelope).await?;
            }
        }
        Ok(())
    }
}
