//! Command handlers for the Donor context.

use hemolink_core::clock::Clock;
use hemolink_core::error::DomainError;
use hemolink_core::publisher::EventPublisher;
use hemolink_dispatch::drain_and_publish;

use crate::domain::aggregates::Donor;
use crate::domain::commands::{RecordDonation, RegisterDonor};
use crate::domain::repository::DonorRepository;

/// Result of a successfully handled donor command.
#[derive(Debug)]
pub struct DonorCommandResult {
    /// The donor affected by the command.
    pub donor_id: i64,
    /// How many domain events were published.
    pub events_published: usize,
}

/// Handles `RegisterDonor`.
///
/// # Errors
///
/// Returns `DomainError` on validation failure, persistence failure, or a
/// subscriber failure during publish.
pub async fn handle_register_donor(
    command: &RegisterDonor,
    repo: &dyn DonorRepository,
    publisher: &dyn EventPublisher,
    clock: &dyn Clock,
) -> Result<DonorCommandResult, DomainError> {
    let donor_id = repo.next_id().await?;
    let mut donor = Donor::register(
        donor_id,
        command.user_id,
        command.full_name.clone(),
        command.blood_type,
        command.phone.clone(),
        command.correlation_id,
        clock,
    )?;

    repo.insert(&donor).await?;
    let events_published = drain_and_publish(&mut donor, publisher).await?;

    Ok(DonorCommandResult {
        donor_id,
        events_published,
    })
}

/// Handles `RecordDonation`.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown donor, `RuleViolation`
/// while the deferral window is running, or a persistence/publish failure.
pub async fn handle_record_donation(
    command: &RecordDonation,
    repo: &dyn DonorRepository,
    publisher: &dyn EventPublisher,
    clock: &dyn Clock,
) -> Result<DonorCommandResult, DomainError> {
    let mut donor = repo
        .find_by_id(command.donor_id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "donor",
            id: command.donor_id,
        })?;
    donor.record_donation(command.donated_on, command.correlation_id, clock)?;

    repo.update(&donor).await?;
    let events_published = drain_and_publish(&mut donor, publisher).await?;

    Ok(DonorCommandResult {
        donor_id: command.donor_id,
        events_published,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicI64, Ordering};

    use async_trait::async_trait;
    use chrono::{NaiveDate, TimeZone, Utc};
    use hemolink_core::aggregate::AggregateRoot;
    use hemolink_core::blood::BloodType;
    use hemolink_test_support::{FixedClock, RecordingPublisher};
    use uuid::Uuid;

    use super::*;

    #[derive(Default)]
    struct InMemoryDonors {
        rows: Mutex<HashMap<i64, Donor>>,
        next: AtomicI64,
    }

    #[async_trait]
    impl DonorRepository for InMemoryDonors {
        async fn next_id(&self) -> Result<i64, DomainError> {
            Ok(self.next.fetch_add(1, Ordering::SeqCst) + 1)
        }

        async fn find_by_id(&self, donor_id: i64) -> Result<Option<Donor>, DomainError> {
            Ok(self.rows.lock().unwrap().get(&donor_id).cloned())
        }

        async fn insert(&self, donor: &Donor) -> Result<(), DomainError> {
            let mut stored = donor.clone();
            stored.clear_events();
            self.rows.lock().unwrap().insert(stored.id, stored);
            Ok(())
        }

        async fn update(&self, donor: &Donor) -> Result<(), DomainError> {
            self.insert(donor).await
        }
    }

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 2, 10, 8, 30, 0).unwrap())
    }

    #[tokio::test]
    async fn test_register_then_record_donation() {
        let repo = InMemoryDonors::default();
        let publisher = RecordingPublisher::new();
        let clock = clock();

        let registered = handle_register_donor(
            &RegisterDonor {
                correlation_id: Uuid::new_v4(),
                user_id: 50,
                full_name: "Amara Perera".to_string(),
                blood_type: BloodType::ONegative,
                phone: Some("+94 77 123 4567".to_string()),
            },
            &repo,
            &publisher,
            &clock,
        )
        .await
        .unwrap();

        let recorded = handle_record_donation(
            &RecordDonation {
                correlation_id: Uuid::new_v4(),
                donor_id: registered.donor_id,
                donated_on: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
            },
            &repo,
            &publisher,
            &clock,
        )
        .await
        .unwrap();

        assert_eq!(recorded.events_published, 1);
        let stored = repo.find_by_id(registered.donor_id).await.unwrap().unwrap();
        assert!(stored.next_eligible_on().is_some());
        let types: Vec<String> = publisher
            .published_events()
            .iter()
            .map(|e| e.event_type().to_string())
            .collect();
        assert_eq!(types, vec!["donor.registered", "donor.donation_recorded"]);
    }

    #[tokio::test]
    async fn test_record_donation_for_unknown_donor_is_not_found() {
        let repo = InMemoryDonors::default();
        let publisher = RecordingPublisher::new();
        let clock = clock();

        let result = handle_record_donation(
            &RecordDonation {
                correlation_id: Uuid::new_v4(),
                donor_id: 9,
                donated_on: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
            },
            &repo,
            &publisher,
            &clock,
        )
        .await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}
