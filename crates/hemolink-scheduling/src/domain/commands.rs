//! Commands for the Appointment Scheduling context.

use chrono::{DateTime, Utc};
use hemolink_core::command::Command;
use uuid::Uuid;

/// Command to book an appointment.
#[derive(Debug, Clone)]
pub struct ScheduleAppointment {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
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
    /// The user booking the appointment.
    pub created_by: i64,
}

impl Command for ScheduleAppointment {
    fn command_type(&self) -> &'static str {
        "scheduling.schedule_appointment"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to record the donor's arrival.
#[derive(Debug, Clone)]
pub struct CheckInDonor {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The appointment identifier.
    pub appointment_id: i64,
}

impl Command for CheckInDonor {
    fn command_type(&self) -> &'static str {
        "scheduling.check_in_donor"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to record that the donor did not arrive.
#[derive(Debug, Clone)]
pub struct MarkNoShow {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The appointment identifier.
    pub appointment_id: i64,
}

impl Command for MarkNoShow {
    fn command_type(&self) -> &'static str {
        "scheduling.mark_no_show"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to call an appointment off.
#[derive(Debug, Clone)]
pub struct CancelAppointment {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The appointment identifier.
    pub appointment_id: i64,
    /// Free-text reason, if one was given.
    pub reason: Option<String>,
}

impl Command for CancelAppointment {
    fn command_type(&self) -> &'static str {
        "scheduling.cancel_appointment"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
