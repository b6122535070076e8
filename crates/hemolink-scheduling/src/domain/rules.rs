//! Business rules for the Appointment Scheduling context.

use chrono::{DateTime, Utc};
use hemolink_core::rule::BusinessRule;

use super::aggregates::AppointmentStatus;

/// An appointment can only be booked for a future time.
#[derive(Debug, Clone, Copy)]
pub struct AppointmentMustBeInFuture {
    /// Requested appointment time.
    pub scheduled_at: DateTime<Utc>,
    /// Current time.
    pub now: DateTime<Utc>,
}

impl BusinessRule for AppointmentMustBeInFuture {
    fn message(&self) -> String {
        "an appointment must be scheduled for a future time".to_string()
    }

    fn is_broken(&self) -> bool {
        self.scheduled_at <= self.now
    }
}

/// Check-in, no-show, and cancellation are only meaningful while the
/// appointment is still scheduled. CHECKED_IN, NO_SHOW, and CANCELLED are
/// terminal.
#[derive(Debug, Clone, Copy)]
pub struct AppointmentIsPending {
    /// Current appointment status.
    pub status: AppointmentStatus,
}

impl BusinessRule for AppointmentIsPending {
    fn message(&self) -> String {
        "only a scheduled appointment can change status".to_string()
    }

    fn is_broken(&self) -> bool {
        self.status != AppointmentStatus::Scheduled
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_scheduling_in_the_past_is_broken() {
        let now = Utc.with_ymd_and_hms(2026, 2, 10, 8, 0, 0).unwrap();
        assert!(
            AppointmentMustBeInFuture {
                scheduled_at: now - chrono::TimeDelta::minutes(1),
                now
            }
            .is_broken()
        );
        assert!(
            AppointmentMustBeInFuture {
                scheduled_at: now,
                now
            }
            .is_broken()
        );
        assert!(
            !AppointmentMustBeInFuture {
                scheduled_at: now + chrono::TimeDelta::hours(1),
                now
            }
            .is_broken()
        );
    }

    #[test]
    fn test_only_scheduled_appointments_may_transition() {
        assert!(
            !AppointmentIsPending {
                status: AppointmentStatus::Scheduled
            }
            .is_broken()
        );
        for status in [
            AppointmentStatus::CheckedIn,
            AppointmentStatus::NoShow,
            AppointmentStatus::Cancelled,
        ] {
            assert!(AppointmentIsPending { status }.is_broken());
        }
    }
}
