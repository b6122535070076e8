//! Domain events for the Appointment Scheduling context.

use chrono::{DateTime, Utc};
use hemolink_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

/// Event type name for `AppointmentScheduled`.
pub const APPOINTMENT_SCHEDULED_EVENT_TYPE: &str = "appointment.scheduled";
/// Event type name for `DonorCheckedIn`.
pub const APPOINTMENT_CHECKED_IN_EVENT_TYPE: &str = "appointment.checked_in";
/// Event type name for `DonorDidNotShow`.
pub const APPOINTMENT_NO_SHOW_EVENT_TYPE: &str = "appointment.no_show";
/// Event type name for `AppointmentCancelled`.
pub const APPOINTMENT_CANCELLED_EVENT_TYPE: &str = "appointment.cancelled";

/// Emitted when an appointment is booked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentScheduled {
    /// The appointment identifier.
    pub appointment_id: i64,
    /// The blood request the appointment serves.
    pub request_id: i64,
    /// The attending donor.
    pub donor_id: i64,
    /// When the appointment takes place.
    pub scheduled_at: DateTime<Utc>,
}

/// Emitted when the donor arrives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonorCheckedIn {
    /// The appointment identifier.
    pub appointment_id: i64,
    /// The attending donor.
    pub donor_id: i64,
}

/// Emitted when the donor does not arrive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonorDidNotShow {
    /// The appointment identifier.
    pub appointment_id: i64,
    /// The absent donor.
    pub donor_id: i64,
}

/// Emitted when the appointment is cancelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentCancelled {
    /// The appointment identifier.
    pub appointment_id: i64,
    /// Free-text reason, if one was given.
    pub reason: Option<String>,
}

/// Event payload variants for the Appointment Scheduling context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppointmentEventKind {
    /// An appointment has been booked.
    Scheduled(AppointmentScheduled),
    /// The donor arrived.
    CheckedIn(DonorCheckedIn),
    /// The donor did not arrive.
    NoShow(DonorDidNotShow),
    /// The appointment was cancelled.
    Cancelled(AppointmentCancelled),
}

/// Domain event envelope for the Appointment Scheduling context.
#[derive(Debug, Clone)]
pub struct AppointmentEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: AppointmentEventKind,
}

impl DomainEvent for AppointmentEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            AppointmentEventKind::Scheduled(_) => APPOINTMENT_SCHEDULED_EVENT_TYPE,
            AppointmentEventKind::CheckedIn(_) => APPOINTMENT_CHECKED_IN_EVENT_TYPE,
            AppointmentEventKind::NoShow(_) => APPOINTMENT_NO_SHOW_EVENT_TYPE,
            AppointmentEventKind::Cancelled(_) => APPOINTMENT_CANCELLED_EVENT_TYPE,
        }
    }

    fn to_payload(&self) -> serde_json::Value {
        serde_json::to_value(&self.kind).expect("AppointmentEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
