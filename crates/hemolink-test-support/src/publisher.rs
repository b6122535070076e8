//! Test publishers — mock `EventPublisher` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use hemolink_core::error::DomainError;
use hemolink_core::event::EventEnvelope;
use hemolink_core::publisher::EventPublisher;

/// An event publisher that records every published envelope and always
/// succeeds.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    published: Mutex<Vec<EventEnvelope>>,
}

impl RecordingPublisher {
    /// Create a new recording publisher with an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all envelopes published so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, envelope: &EventEnvelope) -> Result<(), DomainError> {
        self.published.lock().unwrap().push(envelope.clone());
        Ok(())
    }
}

/// An event publisher that succeeds for the first `fail_at` publishes and
/// then fails every subsequent one. Used to exercise partial-publish paths.
#[derive(Debug)]
pub struct FailingPublisher {
    fail_at: usize,
    published: Mutex<Vec<EventEnvelope>>,
}

impl FailingPublisher {
    /// Create a publisher that fails on the zero-based `fail_at`-th publish.
    /// `fail_at == 0` fails immediately.
    #[must_use]
    pub fn new(fail_at: usize) -> Self {
        Self {
            fail_at,
            published: Mutex::new(Vec::new()),
        }
    }

    /// Returns the envelopes that were published before the failure.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventPublisher for FailingPublisher {
    async fn publish(&self, envelope: &EventEnvelope) -> Result<(), DomainError> {
        let mut published = self.published.lock().unwrap();
        if published.len() >= self.fail_at {
            return Err(DomainError::Infrastructure(
                "subscriber failed".to_string(),
            ));
        }
        published.push(envelope.clone());
        Ok(())
    }
}
