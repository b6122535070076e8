//! `PostgreSQL` implementation of the appointment repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use hemolink_core::error::DomainError;
use hemolink_scheduling::domain::aggregates::{Appointment, AppointmentStatus};
use hemolink_scheduling::domain::repository::AppointmentRepository;

use crate::infra;

/// PostgreSQL-backed appointment repository.
#[derive(Debug, Clone)]
pub struct PgAppointmentRepository {
    pool: PgPool,
}

impl PgAppointmentRepository {
    /// Creates a new `PgAppointmentRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const APPOINTMENT_COLUMNS: &str = "id, request_id, donor_id, location_id, scheduled_at, notes, \
                                   status, created_by, created_at, updated_at";

fn row_to_appointment(row: &PgRow) -> Result<Appointment, DomainError> {
    let status: String = row.try_get("status").map_err(infra)?;
    Ok(Appointment::rehydrate(
        row.try_get("id").map_err(infra)?,
        row.try_get("request_id").map_err(infra)?,
        row.try_get("donor_id").map_err(infra)?,
        row.try_get("location_id").map_err(infra)?,
        row.try_get::<DateTime<Utc>, _>("scheduled_at").map_err(infra)?,
        row.try_get("notes").map_err(infra)?,
        status.parse::<AppointmentStatus>()?,
        row.try_get("created_by").map_err(infra)?,
        row.try_get::<DateTime<Utc>, _>("created_at").map_err(infra)?,
        row.try_get::<Option<DateTime<Utc>>, _>("updated_at")
            .map_err(infra)?,
    ))
}

#[async_trait]
impl AppointmentRepository for PgAppointmentRepository {
    async fn next_id(&self) -> Result<i64, DomainError> {
        let row =
            sqlx::query("SELECT nextval(pg_get_serial_sequence('appointments', 'id')) AS id")
                .fetch_one(&self.pool)
                .await
                .map_err(infra)?;
        row.try_get("id").map_err(infra)
    }

    async fn find_by_id(&self, appointment_id: i64) -> Result<Option<Appointment>, DomainError> {
        let sql = format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(appointment_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(infra)?;
        row.as_ref().map(row_to_appointment).transpose()
    }

    async fn list_by_request(&self, request_id: i64) -> Result<Vec<Appointment>, DomainError> {
        let sql =
            format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE request_id = $1 ORDER BY id");
        let rows = sqlx::query(&sql)
            .bind(request_id)
            .fetch_all(&self.pool)
            .await
            .map_err(infra)?;
        rows.iter().map(row_to_appointment).collect()
    }

    async fn insert(&self, appointment: &Appointment) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO appointments \
             (id, request_id, donor_id, location_id, scheduled_at, notes, status, \
              created_by, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(appointment.id)
        .bind(appointment.request_id)
        .bind(appointment.donor_id)
        .bind(appointment.location_id)
        .bind(appointment.scheduled_at)
        .bind(&appointment.notes)
        .bind(appointment.status().as_str())
        .bind(appointment.created_by)
        .bind(appointment.created_at)
        .bind(appointment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(infra)?;
        Ok(())
    }

    async fn update(&self, appointment: &Appointment) -> Result<(), DomainError> {
        sqlx::query(
            "UPDATE appointments SET scheduled_at = $2, notes = $3, status = $4, \
             updated_at = $5 WHERE id = $1",
        )
        .bind(appointment.id)
        .bind(appointment.scheduled_at)
        .bind(&appointment.notes)
        .bind(appointment.status().as_str())
        .bind(appointment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(infra)?;
        Ok(())
    }
}
