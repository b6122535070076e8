//! Domain event abstractions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata attached to every domain event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Type name for subscriber routing.
    pub event_type: String,
    /// Aggregate this event belongs to.
    pub aggregate_id: i64,
    /// Correlation ID for tracing a command through its effects.
    pub correlation_id: Uuid,
    /// Causation ID linking this event to the command that caused it.
    pub causation_id: Uuid,
    /// Timestamp of event creation.
    pub occurred_at: DateTime<Utc>,
}

/// Trait that all domain events implement.
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Returns the event type name (used for subscriber routing).
    fn event_type(&self) -> &'static str;

    /// Serializes the event payload to JSON.
    fn to_payload(&self) -> serde_json::Value;

    /// Returns the metadata for this event.
    fn metadata(&self) -> &EventMetadata;
}

/// Type-erased form of a domain event, handed to the publisher.
///
/// Events are transient: buffered on the aggregate, wrapped into an envelope
/// at flush time, consumed exactly once by subscribers. Never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct EventEnvelope {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Serialized event payload.
    pub payload: serde_json::Value,
}

impl EventEnvelope {
    /// Wraps a typed domain event into its type-erased form.
    pub fn from_event<E: DomainEvent + ?Sized>(event: &E) -> Self {
        Self {
            metadata: event.metadata().clone(),
            payload: event.to_payload(),
        }
    }

    /// Returns the event type name carried in the metadata.
    #[must_use]
    pub fn event_type(&self) -> &str {
        &self.metadata.event_type
    }
}
