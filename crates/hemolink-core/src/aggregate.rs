//! Aggregate root abstraction.

use crate::event::DomainEvent;

/// Trait for aggregate roots that buffer domain events between a state
/// transition and the next persistence flush.
///
/// Behavior methods record events in insertion order; the dispatch pipeline
/// drains the buffer with [`take_events`](AggregateRoot::take_events) after
/// a successful write. The buffer is never persisted.
pub trait AggregateRoot: Send + Sync {
    /// The event type this aggregate produces.
    type Event: DomainEvent;

    /// Returns the aggregate identifier.
    fn aggregate_id(&self) -> i64;

    /// Returns events recorded since the last flush, in insertion order.
    fn pending_events(&self) -> &[Self::Event];

    /// Removes and returns all pending events, leaving the buffer empty.
    fn take_events(&mut self) -> Vec<Self::Event>;

    /// Discards all pending events. Idempotent.
    fn clear_events(&mut self);
}
