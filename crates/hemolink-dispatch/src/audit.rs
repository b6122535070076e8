//! Audit-log subscriber.

use async_trait::async_trait;
use hemolink_core::error::DomainError;
use hemolink_core::event::EventEnvelope;

use crate::publisher::EventHandler;

/// Writes a structured log record for every published domain event.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditLogHandler;

#[async_trait]
impl EventHandler for AuditLogHandler {
    fn wants(&self, _event_type: &str) -> bool {
        true
    }

    async fn handle(&self, envelope: &EventEnvelope) -> Result<(), DomainError> {
        tracing::info!(
            event_type = envelope.event_type(),
            aggregate_id = envelope.metadata.aggregate_id,
            correlation_id = %envelope.metadata.correlation_id,
            occurred_at = %envelope.metadata.occurred_at,
            "domain event"
        );
        Ok(())
    }
}
