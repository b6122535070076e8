//! Drain-and-publish flush for aggregate event buffers.

use hemolink_core::aggregate::AggregateRoot;
use hemolink_core::error::DomainError;
use hemolink_core::event::{DomainEvent, EventEnvelope};
use hemolink_core::publisher::EventPublisher;

/// Empties the aggregate's event buffer and publishes every captured event
/// in insertion order, awaiting each publish before the next.
///
/// The buffer is snapshotted and cleared up front, so a given batch is
/// published at most once even when the caller retries after a failure.
/// Returns the number of events published.
///
/// # Errors
///
/// Propagates the first subscriber failure. Events published before the
/// failure stay published; there is no compensation or retry.
pub async fn drain_and_publish<A: AggregateRoot>(
    aggregate: &mut A,
    publisher: &dyn EventPublisher,
) -> Result<usize, DomainError> {
    let events = aggregate.take_events();
    let mut published = 0;
    for event in &events {
        let envelope = EventEnvelope::from_event(event);
        tracing::debug!(
            event_type = event.event_type(),
            aggregate_id = envelope.metadata.aggregate_id,
            "publishing domain event"
        );
        publisher.publish(&envelope).await?;
        published += 1;
    }
    Ok(published)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use hemolink_core::event::EventMetadata;
    use hemolink_test_support::{FailingPublisher, RecordingPublisher};
    use uuid::Uuid;

    use super::*;

    #[derive(Debug, Clone)]
    struct PingEvent {
        metadata: EventMetadata,
        n: u32,
    }

    impl DomainEvent for PingEvent {
        fn event_type(&self) -> &'static str {
            "test.ping"
        }

        fn to_payload(&self) -> serde_json::Value {
            serde_json::json!({ "n": self.n })
        }

        fn metadata(&self) -> &EventMetadata {
            &self.metadata
        }
    }

    struct Pinger {
        id: i64,
        pending: Vec<PingEvent>,
    }

    impl Pinger {
        fn with_events(count: u32) -> Self {
            let pending = (0..count)
                .map(|n| PingEvent {
                    metadata: EventMetadata {
                        event_id: Uuid::new_v4(),
                        event_type: "test.ping".to_string(),
                        aggregate_id: 42,
                        correlation_id: Uuid::new_v4(),
                        causation_id: Uuid::new_v4(),
                        occurred_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
                    },
                    n,
                })
                .collect();
            Self { id: 42, pending }
        }
    }

    impl AggregateRoot for Pinger {
        type Event = PingEvent;

        fn aggregate_id(&self) -> i64 {
            self.id
        }

        fn pending_events(&self) -> &[Self::Event] {
            &self.pending
        }

        fn take_events(&mut self) -> Vec<Self::Event> {
            std::mem::take(&mut self.pending)
        }

        fn clear_events(&mut self) {
            self.pending.clear();
        }
    }

    #[tokio::test]
    async fn test_all_buffered_events_are_published_in_insertion_order() {
        // Arrange
        let mut aggregate = Pinger::with_events(3);
        let publisher = RecordingPublisher::new();

        // Act
        let published = drain_and_publish(&mut aggregate, &publisher).await.unwrap();

        // Assert
        assert_eq!(published, 3);
        assert!(aggregate.pending_events().is_empty());
        let seen = publisher.published_events();
        assert_eq!(seen.len(), 3);
        for (i, envelope) in seen.iter().enumerate() {
            assert_eq!(envelope.payload["n"], i as u32);
        }
    }

    #[tokio::test]
    async fn test_failure_midway_leaves_earlier_events_published() {
        // Arrange: third publish fails.
        let mut aggregate = Pinger::with_events(5);
        let publisher = FailingPublisher::new(2);

        // Act
        let result = drain_and_publish(&mut aggregate, &publisher).await;

        // Assert: the first two events went out, the buffer is drained, and
        // the failure surfaces to the caller.
        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
        let seen = publisher.published_events();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].payload["n"], 0);
        assert_eq!(seen[1].payload["n"], 1);
        assert!(aggregate.pending_events().is_empty());
    }

    #[tokio::test]
    async fn test_draining_an_empty_buffer_publishes_nothing() {
        let mut aggregate = Pinger::with_events(0);
        let publisher = RecordingPublisher::new();

        let published = drain_and_publish(&mut aggregate, &publisher).await.unwrap();

        assert_eq!(published, 0);
        assert!(publisher.published_events().is_empty());
    }
}
