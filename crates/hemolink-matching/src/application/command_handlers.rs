//! Command handlers for the Donor Matching context.
//!
//! Each handler orchestrates one unit of work: load (or allocate and
//! construct) the aggregate, invoke the behavior method, persist, then drain
//! the event buffer through the publisher. A subscriber failure surfaces
//! from the handler after the row is written.

use hemolink_core::clock::Clock;
use hemolink_core::error::DomainError;
use hemolink_core::publisher::EventPublisher;
use hemolink_dispatch::drain_and_publish;

use crate::domain::aggregates::{DonorMatch, MatchStatus};
use crate::domain::commands::{
    AcceptMatch, DeclineMatch, MarkMatchContacted, MarkMatchNoAnswer, ProposeMatch,
};
use crate::domain::repository::MatchRepository;

/// Result of a successfully handled matching command.
#[derive(Debug)]
pub struct MatchCommandResult {
    /// The match affected by the command.
    pub match_id: i64,
    /// The match status after the command.
    pub status: MatchStatus,
    /// How many domain events were published.
    pub events_published: usize,
}

async fn load(repo: &dyn MatchRepository, match_id: i64) -> Result<DonorMatch, DomainError> {
    repo.find_by_id(match_id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "match",
            id: match_id,
        })
}

/// Handles `ProposeMatch`: allocates an id, constructs the aggregate,
/// persists it, and publishes the proposal event.
///
/// # Errors
///
/// Returns `DomainError` on validation failure, persistence failure, or a
/// subscriber failure during publish.
pub async fn handle_propose_match(
    command: &ProposeMatch,
    repo: &dyn MatchRepository,
    publisher: &dyn EventPublisher,
    clock: &dyn Clock,
) -> Result<MatchCommandResult, DomainError> {
    let match_id = repo.next_id().await?;
    let mut donor_match = DonorMatch::propose(
        match_id,
        command.request_id,
        command.donor_id,
        command.compatibility_score,
        command.distance_km,
        command.correlation_id,
        clock,
    )?;

    repo.insert(&donor_match).await?;
    let events_published = drain_and_publish(&mut donor_match, publisher).await?;

    Ok(MatchCommandResult {
        match_id,
        status: donor_match.status(),
        events_published,
    })
}

/// Handles `MarkMatchContacted`.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown match, `RuleViolation`
/// when the match is not PROPOSED, or a persistence/publish failure.
pub async fn handle_mark_contacted(
    command: &MarkMatchContacted,
    repo: &dyn MatchRepository,
    publisher: &dyn EventPublisher,
    clock: &dyn Clock,
) -> Result<MatchCommandResult, DomainError> {
    let mut donor_match = load(repo, command.match_id).await?;
    donor_match.mark_contacted(command.correlation_id, clock)?;

    repo.update(&donor_match).await?;
    let events_published = drain_and_publish(&mut donor_match, publisher).await?;

    Ok(MatchCommandResult {
        match_id: command.match_id,
        status: donor_match.status(),
        events_published,
    })
}

/// Handles `AcceptMatch`.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown match, `RuleViolation`
/// when the match is not CONTACTED, or a persistence/publish failure.
pub async fn handle_accept_match(
    command: &AcceptMatch,
    repo: &dyn MatchRepository,
    publisher: &dyn EventPublisher,
    clock: &dyn Clock,
) -> Result<MatchCommandResult, DomainError> {
    let mut donor_match = load(repo, command.match_id).await?;
    donor_match.accept(command.correlation_id, clock)?;

    repo.update(&donor_match).await?;
    let events_published = drain_and_publish(&mut donor_match, publisher).await?;

    Ok(MatchCommandResult {
        match_id: command.match_id,
        status: donor_match.status(),
        events_published,
    })
}

/// Handles `DeclineMatch`.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown match, `RuleViolation`
/// when the match is not CONTACTED, or a persistence/publish failure.
pub async fn handle_decline_match(
    command: &DeclineMatch,
    repo: &dyn MatchRepository,
    publisher: &dyn EventPublisher,
    clock: &dyn Clock,
) -> Result<MatchCommandResult, DomainError> {
    let mut donor_match = load(repo, command.match_id).await?;
    donor_match.decline(command.reason.clone(), command.correlation_id, clock)?;

    repo.update(&donor_match).await?;
    let events_published = drain_and_publish(&mut donor_match, publisher).await?;

    Ok(MatchCommandResult {
        match_id: command.match_id,
        status: donor_match.status(),
        events_published,
    })
}

/// Handles `MarkMatchNoAnswer`.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown match, `RuleViolation`
/// when the match is not CONTACTED, or a persistence/publish failure.
pub async fn handle_mark_no_answer(
    command: &MarkMatchNoAnswer,
    repo: &dyn MatchRepository,
    publisher: &dyn EventPublisher,
    clock: &dyn Clock,
) -> Result<MatchCommandResult, DomainError> {
    let mut donor_match = load(repo, command.match_id).await?;
    donor_match.mark_no_answer(command.correlation_id, clock)?;

    repo.update(&donor_match).await?;
    let events_published = drain_and_publish(&mut donor_match, publisher).await?;

    Ok(MatchCommandResult {
        match_id: command.match_id,
        status: donor_match.status(),
        events_published,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicI64, Ordering};

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use hemolink_core::aggregate::AggregateRoot;
    use hemolink_test_support::{FailingPublisher, FixedClock, RecordingPublisher};
    use uuid::Uuid;

    use super::*;

    #[derive(Default)]
    struct InMemoryMatches {
        rows: Mutex<HashMap<i64, DonorMatch>>,
        next: AtomicI64,
    }

    #[async_trait]
    impl MatchRepository for InMemoryMatches {
        async fn next_id(&self) -> Result<i64, DomainError> {
            Ok(self.next.fetch_add(1, Ordering::SeqCst) + 1)
        }

        async fn find_by_id(&self, match_id: i64) -> Result<Option<DonorMatch>, DomainError> {
            Ok(self.rows.lock().unwrap().get(&match_id).cloned())
        }

        async fn list_by_request(&self, request_id: i64) -> Result<Vec<DonorMatch>, DomainError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .filter(|m| m.request_id == request_id)
                .cloned()
                .collect())
        }

        async fn insert(&self, donor_match: &DonorMatch) -> Result<(), DomainError> {
            let mut stored = donor_match.clone();
            stored.clear_events();
            self.rows.lock().unwrap().insert(stored.id, stored);
            Ok(())
        }

        async fn update(&self, donor_match: &DonorMatch) -> Result<(), DomainError> {
            self.insert(donor_match).await
        }
    }

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 2, 10, 8, 30, 0).unwrap())
    }

    fn propose_command() -> ProposeMatch {
        ProposeMatch {
            correlation_id: Uuid::new_v4(),
            request_id: 10,
            donor_id: 20,
            compatibility_score: Some(0.8),
            distance_km: 3.5,
        }
    }

    #[tokio::test]
    async fn test_propose_persists_and_publishes() {
        // Arrange
        let repo = InMemoryMatches::default();
        let publisher = RecordingPublisher::new();
        let clock = clock();

        // Act
        let result = handle_propose_match(&propose_command(), &repo, &publisher, &clock)
            .await
            .unwrap();

        // Assert
        assert_eq!(result.status, MatchStatus::Proposed);
        assert_eq!(result.events_published, 1);
        let stored = repo.find_by_id(result.match_id).await.unwrap().unwrap();
        assert!(stored.pending_events().is_empty());
        let published = publisher.published_events();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].event_type(), "match.proposed");
    }

    #[tokio::test]
    async fn test_contact_then_accept_round_trip() {
        let repo = InMemoryMatches::default();
        let publisher = RecordingPublisher::new();
        let clock = clock();
        let proposed = handle_propose_match(&propose_command(), &repo, &publisher, &clock)
            .await
            .unwrap();

        let contact = MarkMatchContacted {
            correlation_id: Uuid::new_v4(),
            match_id: proposed.match_id,
        };
        let contacted = handle_mark_contacted(&contact, &repo, &publisher, &clock)
            .await
            .unwrap();
        assert_eq!(contacted.status, MatchStatus::Contacted);

        let accept = AcceptMatch {
            correlation_id: Uuid::new_v4(),
            match_id: proposed.match_id,
        };
        let accepted = handle_accept_match(&accept, &repo, &publisher, &clock)
            .await
            .unwrap();
        assert_eq!(accepted.status, MatchStatus::Accepted);

        let types: Vec<String> = publisher
            .published_events()
            .iter()
            .map(|e| e.event_type().to_string())
            .collect();
        assert_eq!(
            types,
            vec!["match.proposed", "match.contacted", "match.accepted"]
        );
    }

    #[tokio::test]
    async fn test_accept_unknown_match_is_not_found() {
        let repo = InMemoryMatches::default();
        let publisher = RecordingPublisher::new();
        let clock = clock();

        let result = handle_accept_match(
            &AcceptMatch {
                correlation_id: Uuid::new_v4(),
                match_id: 999,
            },
            &repo,
            &publisher,
            &clock,
        )
        .await;

        match result.unwrap_err() {
            DomainError::NotFound { entity, id } => {
                assert_eq!(entity, "match");
                assert_eq!(id, 999);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rule_violation_publishes_nothing() {
        let repo = InMemoryMatches::default();
        let publisher = RecordingPublisher::new();
        let clock = clock();
        let proposed = handle_propose_match(&propose_command(), &repo, &publisher, &clock)
            .await
            .unwrap();

        // Accept straight from PROPOSED.
        let result = handle_accept_match(
            &AcceptMatch {
                correlation_id: Uuid::new_v4(),
                match_id: proposed.match_id,
            },
            &repo,
            &publisher,
            &clock,
        )
        .await;

        assert!(matches!(result, Err(DomainError::RuleViolation(_))));
        // Only the proposal event ever went out.
        assert_eq!(publisher.published_events().len(), 1);
        let stored = repo.find_by_id(proposed.match_id).await.unwrap().unwrap();
        assert_eq!(stored.status(), MatchStatus::Proposed);
    }

    #[tokio::test]
    async fn test_subscriber_failure_surfaces_after_write() {
        let repo = InMemoryMatches::default();
        let publisher = FailingPublisher::new(0);
        let clock = clock();

        let result = handle_propose_match(&propose_command(), &repo, &publisher, &clock).await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
        // The row was written before the publish failed.
        assert_eq!(repo.rows.lock().unwrap().len(), 1);
    }
}
