//! Query handlers for the Appointment Scheduling context.

use chrono::{DateTime, Utc};
use hemolink_core::error::DomainError;
use serde::Serialize;

use crate::domain::aggregates::Appointment;
use crate::domain::repository::AppointmentRepository;

/// Read-only view of an appointment.
#[derive(Debug, Serialize)]
pub struct AppointmentView {
    /// The appointment identifier.
    pub appointment_id: i64,
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
    /// Lifecycle status ("SCHEDULED", "CHECKED_IN", ...).
    pub status: &'static str,
    /// The user who booked the appointment.
    pub created_by: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&Appointment> for AppointmentView {
    fn from(appointment: &Appointment) -> Self {
        Self {
            appointment_id: appointment.id,
            request_id: appointment.request_id,
            donor_id: appointment.donor_id,
            location_id: appointment.location_id,
            scheduled_at: appointment.scheduled_at,
            notes: appointment.notes.clone(),
            status: appointment.status().as_str(),
            created_by: appointment.created_by,
            created_at: appointment.created_at,
        }
    }
}

/// Retrieves an appointment by id.
///
/// # Errors
///
/// Returns `DomainError::NotFound` when the appointment does not exist.
pub async fn get_appointment_by_id(
    appointment_id: i64,
    repo: &dyn AppointmentRepository,
) -> Result<AppointmentView, DomainError> {
    let appointment = repo
        .find_by_id(appointment_id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "appointment",
            id: appointment_id,
        })?;
    Ok(AppointmentView::from(&appointment))
}

/// Lists all appointments booked against a blood request, ordered by id.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` on a storage failure.
pub async fn list_appointments_for_request(
    request_id: i64,
    repo: &dyn AppointmentRepository,
) -> Result<Vec<AppointmentView>, DomainError> {
    let mut appointments = repo.list_by_request(request_id).await?;
    appointments.sort_by_key(|a| a.id);
    Ok(appointments.iter().map(AppointmentView::from).collect())
}
