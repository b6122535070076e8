//! Command handlers for the Appointment Scheduling context.
//!
//! Each handler orchestrates one unit of work: load (or allocate and
//! construct) the aggregate, invoke the behavior method, persist, then drain
//! the event buffer through the publisher.

use hemolink_core::clock::Clock;
use hemolink_core::error::DomainError;
use hemolink_core::publisher::EventPublisher;
use hemolink_dispatch::drain_and_publish;

use crate::domain::aggregates::{Appointment, AppointmentStatus};
use crate::domain::commands::{CancelAppointment, CheckInDonor, MarkNoShow, ScheduleAppointment};
use crate::domain::repository::AppointmentRepository;

/// Result of a successfully handled scheduling command.
#[derive(Debug)]
pub struct AppointmentCommandResult {
    /// The appointment affected by the command.
    pub appointment_id: i64,
    /// The appointment status after the command.
    pub status: AppointmentStatus,
    /// How many domain events were published.
    pub events_published: usize,
}

async fn load(
    repo: &dyn AppointmentRepository,
    appointment_id: i64,
) -> Result<Appointment, DomainError> {
    repo.find_by_id(appointment_id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "appointment",
            id: appointment_id,
        })
}

/// Handles `ScheduleAppointment`: allocates an id, constructs the aggregate,
/// persists it, and publishes the scheduled event.
///
/// # Errors
///
/// Returns `DomainError::RuleViolation` when the slot is not in the future,
/// or a persistence/publish failure.
pub async fn handle_schedule_appointment(
    command: &ScheduleAppointment,
    repo: &dyn AppointmentRepository,
    publisher: &dyn EventPublisher,
    clock: &dyn Clock,
) -> Result<AppointmentCommandResult, DomainError> {
    let appointment_id = repo.next_id().await?;
    let mut appointment = Appointment::schedule(
        appointment_id,
        command.request_id,
        command.donor_id,
        command.location_id,
        command.scheduled_at,
        command.notes.clone(),
        command.created_by,
        command.correlation_id,
        clock,
    )?;

    repo.insert(&appointment).await?;
    let events_published = drain_and_publish(&mut appointment, publisher).await?;

    Ok(AppointmentCommandResult {
        appointment_id,
        status: appointment.status(),
        events_published,
    })
}

/// Handles `CheckInDonor`.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown appointment,
/// `RuleViolation` when the appointment is not SCHEDULED, or a
/// persistence/publish failure.
pub async fn handle_check_in_donor(
    command: &CheckInDonor,
    repo: &dyn AppointmentRepository,
    publisher: &dyn EventPublisher,
    clock: &dyn Clock,
) -> Result<AppointmentCommandResult, DomainError> {
    let mut appointment = load(repo, command.appointment_id).await?;
    appointment.check_in(command.correlation_id, clock)?;

    repo.update(&appointment).await?;
    let events_published = drain_and_publish(&mut appointment, publisher).await?;

    Ok(AppointmentCommandResult {
        appointment_id: command.appointment_id,
        status: appointment.status(),
        events_published,
    })
}

/// Handles `MarkNoShow`.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown appointment,
/// `RuleViolation` when the appointment is not SCHEDULED, or a
/// persistence/publish failure.
pub async fn handle_mark_no_show(
    command: &MarkNoShow,
    repo: &dyn AppointmentRepository,
    publisher: &dyn EventPublisher,
    clock: &dyn Clock,
) -> Result<AppointmentCommandResult, DomainError> {
    let mut appointment = load(repo, command.appointment_id).await?;
    appointment.mark_no_show(command.correlation_id, clock)?;

    repo.update(&appointment).await?;
    let events_published = drain_and_publish(&mut appointment, publisher).await?;

    Ok(AppointmentCommandResult {
        appointment_id: command.appointment_id,
        status: appointment.status(),
        events_published,
    })
}

/// Handles `CancelAppointment`.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown appointment,
/// `RuleViolation` when the appointment is not SCHEDULED, or a
/// persistence/publish failure.
pub async fn handle_cancel_appointment(
    command: &CancelAppointment,
    repo: &dyn AppointmentRepository,
    publisher: &dyn EventPublisher,
    clock: &dyn Clock,
) -> Result<AppointmentCommandResult, DomainError> {
    let mut appointment = load(repo, command.appointment_id).await?;
    appointment.cancel(command.reason.clone(), command.correlation_id, clock)?;

    repo.update(&appointment).await?;
    let events_published = drain_and_publish(&mut appointment, publisher).await?;

    Ok(AppointmentCommandResult {
        appointment_id: command.appointment_id,
        status: appointment.status(),
        events_published,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicI64, Ordering};

    use async_trait::async_trait;
    use chrono::{TimeDelta, TimeZone, Utc};
    use hemolink_core::aggregate::AggregateRoot;
    use hemolink_test_support::{FixedClock, RecordingPublisher};
    use uuid::Uuid;

    use super::*;

    #[derive(Default)]
    struct InMemoryAppointments {
        rows: Mutex<HashMap<i64, Appointment>>,
        next: AtomicI64,
    }

    #[async_trait]
    impl AppointmentRepository for InMemoryAppointments {
        async fn next_id(&self) -> Result<i64, DomainError> {
            Ok(self.next.fetch_add(1, Ordering::SeqCst) + 1)
        }

        async fn find_by_id(
            &self,
            appointment_id: i64,
        ) -> Result<Option<Appointment>, DomainError> {
            Ok(self.rows.lock().unwrap().get(&appointment_id).cloned())
        }

        async fn list_by_request(&self, request_id: i64) -> Result<Vec<Appointment>, DomainError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .filter(|a| a.request_id == request_id)
                .cloned()
                .collect())
        }

        async fn insert(&self, appointment: &Appointment) -> Result<(), DomainError> {
            let mut stored = appointment.clone();
            stored.clear_events();
            self.rows.lock().unwrap().insert(stored.id, stored);
            Ok(())
        }

        async fn update(&self, appointment: &Appointment) -> Result<(), DomainError> {
            self.insert(appointment).await
        }
    }

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 2, 10, 8, 30, 0).unwrap())
    }

    fn schedule_command(clock: &FixedClock) -> ScheduleAppointment {
        ScheduleAppointment {
            correlation_id: Uuid::new_v4(),
            request_id: 10,
            donor_id: 20,
            location_id: Some(3),
            scheduled_at: clock.0 + TimeDelta::days(2),
            notes: None,
            created_by: 7,
        }
    }

    #[tokio::test]
    async fn test_schedule_persists_and_publishes() {
        // Arrange
        let repo = InMemoryAppointments::default();
        let publisher = RecordingPublisher::new();
        let clock = clock();

        // Act
        let result =
            handle_schedule_appointment(&schedule_command(&clock), &repo, &publisher, &clock)
                .await
                .unwrap();

        // Assert
        assert_eq!(result.status, AppointmentStatus::Scheduled);
        assert_eq!(result.events_published, 1);
        let stored = repo
            .find_by_id(result.appointment_id)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.pending_events().is_empty());
        let published = publisher.published_events();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].event_type(), "appointment.scheduled");
    }

    #[tokio::test]
    async fn test_schedule_in_the_past_is_rejected() {
        let repo = InMemoryAppointments::default();
        let publisher = RecordingPublisher::new();
        let clock = clock();
        let mut command = schedule_command(&clock);
        command.scheduled_at = clock.0 - TimeDelta::hours(1);

        let result = handle_schedule_appointment(&command, &repo, &publisher, &clock).await;

        assert!(matches!(result, Err(DomainError::RuleViolation(_))));
        assert!(publisher.published_events().is_empty());
    }

    #[tokio::test]
    async fn test_check_in_round_trip() {
        let repo = InMemoryAppointments::default();
        let publisher = RecordingPublisher::new();
        let clock = clock();
        let scheduled =
            handle_schedule_appointment(&schedule_command(&clock), &repo, &publisher, &clock)
                .await
                .unwrap();

        let checked_in = handle_check_in_donor(
            &CheckInDonor {
                correlation_id: Uuid::new_v4(),
                appointment_id: scheduled.appointment_id,
            },
            &repo,
            &publisher,
            &clock,
        )
        .await
        .unwrap();

        assert_eq!(checked_in.status, AppointmentStatus::CheckedIn);
        let types: Vec<String> = publisher
            .published_events()
            .iter()
            .map(|e| e.event_type().to_string())
            .collect();
        assert_eq!(types, vec!["appointment.scheduled", "appointment.checked_in"]);
    }

    #[tokio::test]
    async fn test_cancel_unknown_appointment_is_not_found() {
        let repo = InMemoryAppointments::default();
        let publisher = RecordingPublisher::new();
        let clock = clock();

        let result = handle_cancel_appointment(
            &CancelAppointment {
                correlation_id: Uuid::new_v4(),
                appointment_id: 404,
                reason: None,
            },
            &repo,
            &publisher,
            &clock,
        )
        .await;

        match result.unwrap_err() {
            DomainError::NotFound { entity, id } => {
                assert_eq!(entity, "appointment");
                assert_eq!(id, 404);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_no_show_after_cancel_is_rejected() {
        let repo = InMemoryAppointments::default();
        let publisher = RecordingPublisher::new();
        let clock = clock();
        let scheduled =
            handle_schedule_appointment(&schedule_command(&clock), &repo, &publisher, &clock)
                .await
                .unwrap();
        handle_cancel_appointment(
            &CancelAppointment {
                correlation_id: Uuid::new_v4(),
                appointment_id: scheduled.appointment_id,
                reason: Some("donor unavailable".into()),
            },
            &repo,
            &publisher,
            &clock,
        )
        .await
        .unwrap();

        let result = handle_mark_no_show(
            &MarkNoShow {
                correlation_id: Uuid::new_v4(),
                appointment_id: scheduled.appointment_id,
            },
            &repo,
            &publisher,
            &clock,
        )
        .await;

        assert!(matches!(result, Err(DomainError::RuleViolation(_))));
        let stored = repo
            .find_by_id(scheduled.appointment_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status(), AppointmentStatus::Cancelled);
    }
}
