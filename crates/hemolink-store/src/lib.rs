//! Hemolink — persistence layer.
//!
//! One repository implementation pair per bounded context: a
//! Postgres-backed repository for production and an in-memory repository
//! for tests and local runs. Both persist aggregate state only; the
//! pending-event buffer never reaches storage.

pub mod memory;

pub(crate) fn infra(e: sqlx::Error) -> hemolink_core::error::DomainError {
    hemolink_core::error::DomainError::Infrastructure(e.to_string())
}

pub mod pg_appointments;
pub mod pg_donors;
pub mod pg_matches;
pub mod pg_posts;
pub mod pg_requests;
pub mod schema;
