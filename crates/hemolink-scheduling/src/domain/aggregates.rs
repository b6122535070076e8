//! Aggregate roots for the Appointment Scheduling context.

use chrono::{DateTime, Utc};
use hemolink_core::aggregate::AggregateRoot;
use hemolink_core::clock::Clock;
use hemolink_core::error::DomainError;
use hemolink_core::event::{DomainEvent, EventMetadata};
use hemolink_core::rule::check_rule;
use uuid::Uuid;

use super::events::{
    AppointmentCancelled, AppointmentEvent, AppointmentEventKind, AppointmentScheduled,
    DonorCheckedIn, DonorDidNotShow,
};
use super::rules::{AppointmentIsPending, AppointmentMustBeInFuture};

/// Lifecycle status of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentStatus {
    /// Booked and awaiting the donor.
    Scheduled,
    /// The donor arrived. Terminal.
    CheckedIn,
    /// The donor did not arrive. Terminal.
    NoShow,
    /// Called off before it took place. Terminal.
    Cancelled,
}

impl AppointmentStatus {
    /// Returns the storage representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "SCHEDULED",
            Self::CheckedIn => "CHECKED_IN",
            Self::NoShow => "NO_SHOW",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SCHEDULED" => Ok(Self::Scheduled),
            "CHECKED_IN" => Ok(Self::CheckedIn),
            "NO_SHOW" => Ok(Self::NoShow),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(DomainError::Validation(format!(
                "unknown appointment status: {other}"
            ))),
        }
    }
}

/// The aggregate root for a donation appointment.
#[derive(Debug, Clone)]
pub struct Appointment {
    /// Aggregate identifier.
    pub id: i64,
    /// The blood request the appointment serves.
    pub request_id: i64,
    /// The attending donor.
    pub donor_id: i64,
    /// Donation location, when one is recorded.
    pub location_id: Option<i64>,
    /// When the appointment takes place.
    pub scheduled_at: DateTime<Utc>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Current lifecycle status.
    pub(crate) status: AppointmentStatus,
    /// The user who booked the appointment.
    pub created_by: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: Option<DateTime<Utc>>,
    pending_events: Vec<AppointmentEvent>,
}

impl Appointment {
    /// Books an appointment.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RuleViolation` when the requested time is not
    /// in the future.
    #[allow(clippy::too_many_arguments)]
    pub fn schedule(
        id: i64,
        request_id: i64,
        donor_id: i64,
        location_id: Option<i64>,
        scheduled_at: DateTime<Utc>,
        notes: Option<String>,
        created_by: i64,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<Self, DomainError> {
        check_rule(&AppointmentMustBeInFuture {
            scheduled_at,
            now: clock.now(),
        })?;

        let mut appointment = Self {
            id,
            request_id,
            donor_id,
            location_id,
            scheduled_at,
            notes,
            status: AppointmentStatus::Scheduled,
            created_by,
            created_at: clock.now(),
            updated_at: None,
            pending_events: Vec::new(),
        };
        appointment.push_event(
            AppointmentEventKind::Scheduled(AppointmentScheduled {
                appointment_id: id,
                request_id,
                donor_id,
                scheduled_at,
            }),
            correlation_id,
            clock,
        );
        Ok(appointment)
    }

    /// Rebuilds an appointment from trusted persisted state.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn rehydrate(
        id: i64,
        request_id: i64,
        donor_id: i64,
        location_id: Option<i64>,
        scheduled_at: DateTime<Utc>,
        notes: Option<String>,
        status: AppointmentStatus,
        created_by: i64,
        created_at: DateTime<Utc>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            request_id,
            donor_id,
            location_id,
            scheduled_at,
            notes,
            status,
            created_by,
            created_at,
            updated_at,
            pending_events: Vec::new(),
        }
    }

    /// Returns the current lifecycle status.
    #[must_use]
    pub fn status(&self) -> AppointmentStatus {
        self.status
    }

    /// Records the donor's arrival.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RuleViolation` unless the appointment is
    /// SCHEDULED.
    pub fn check_in(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        check_rule(&AppointmentIsPending {
            status: self.status,
        })?;

        self.status = AppointmentStatus::CheckedIn;
        self.updated_at = Some(clock.now());
        self.push_event(
            AppointmentEventKind::CheckedIn(DonorCheckedIn {
                appointment_id: self.id,
                donor_id: self.donor_id,
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Records that the donor did not arrive.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RuleViolation` unless the appointment is
    /// SCHEDULED.
    pub fn mark_no_show(
        &mut self,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        check_rule(&AppointmentIsPending {
            status: self.status,
        })?;

        self.status = AppointmentStatus::NoShow;
        self.updated_at = Some(clock.now());
        self.push_event(
            AppointmentEventKind::NoShow(DonorDidNotShow {
                appointment_id: self.id,
                donor_id: self.donor_id,
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Calls the appointment off.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RuleViolation` unless the appointment is
    /// SCHEDULED.
    pub fn cancel(
        &mut self,
        reason: Option<String>,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        check_rule(&AppointmentIsPending {
            status: self.status,
        })?;

        self.status = AppointmentStatus::Cancelled;
        self.updated_at = Some(clock.now());
        self.push_event(
            AppointmentEventKind::Cancelled(AppointmentCancelled {
                appointment_id: self.id,
                reason,
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    fn push_event(&mut self, kind: AppointmentEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        let mut event = AppointmentEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: String::new(),
                aggregate_id: self.id,
                correlation_id,
                causation_id: correlation_id,
                occurred_at: clock.now(),
            },
            kind,
        };
        event.metadata.event_type = event.event_type().to_owned();
        self.pending_events.push(event);
    }
}

impl AggregateRoot for Appointment {
    type Event = AppointmentEvent;

    fn aggregate_id(&self) -> i64 {
        self.id
    }

    fn pending_events(&self) -> &[Self::Event] {
        &self.pending_events
    }

    fn take_events(&mut self) -> Vec<Self::Event> {
        std::mem::take(&mut self.pending_events)
    }

    fn clear_events(&mut self) {
        self.pending_events.clear();
    }
}
