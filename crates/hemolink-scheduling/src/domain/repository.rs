//! Repository abstraction for the Appointment Scheduling context.

use async_trait::async_trait;
use hemolink_core::error::DomainError;

use super::aggregates::Appointment;

/// State repository for appointments.
///
/// The pending-event buffer is not part of persisted state; implementations
/// store and return aggregates with an empty buffer.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Allocates the next surrogate key.
    async fn next_id(&self) -> Result<i64, DomainError>;

    /// Loads an appointment by id, or `None` when it does not exist.
    async fn find_by_id(&self, appointment_id: i64) -> Result<Option<Appointment>, DomainError>;

    /// Lists all appointments booked against a blood request.
    async fn list_by_request(&self, request_id: i64) -> Result<Vec<Appointment>, DomainError>;

    /// Persists a newly scheduled appointment.
    async fn insert(&self, appointment: &Appointment) -> Result<(), DomainError>;

    /// Persists the current state of an existing appointment.
    async fn update(&self, appointment: &Appointment) -> Result<(), DomainError>;
}
