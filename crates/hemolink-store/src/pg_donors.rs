//! `PostgreSQL` implementation of the donor repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use hemolink_core::blood::BloodType;
use hemolink_core::error::DomainError;
use hemolink_donors::domain::aggregates::Donor;
use hemolink_donors::domain::repository::DonorRepository;

use crate::infra;

/// PostgreSQL-backed donor repository.
#[derive(Debug, Clone)]
pub struct PgDonorRepository {
    pool: PgPool,
}

impl PgDonorRepository {
    /// Creates a new `PgDonorRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_donor(row: &PgRow) -> Result<Donor, DomainError> {
    let blood_type: String = row.try_get("blood_type").map_err(infra)?;
    Ok(Donor::rehydrate(
        row.try_get("id").map_err(infra)?,
        row.try_get("user_id").map_err(infra)?,
        row.try_get("full_name").map_err(infra)?,
        blood_type.parse::<BloodType>()?,
        row.try_get("phone").map_err(infra)?,
        row.try_get::<Option<NaiveDate>, _>("next_eligible_on")
            .map_err(infra)?,
        row.try_get::<DateTime<Utc>, _>("created_at").map_err(infra)?,
        row.try_get::<Option<DateTime<Utc>>, _>("updated_at")
            .map_err(infra)?,
    ))
}

#[async_trait]
impl DonorRepository for PgDonorRepository {
    async fn next_id(&self) -> Result<i64, DomainError> {
        let row = sqlx::query("SELECT nextval(pg_get_serial_sequence('donors', 'id')) AS id")
            .fetch_one(&self.pool)
            .await
            .map_err(infra)?;
        row.try_get("id").map_err(infra)
    }

    async fn find_by_id(&self, donor_id: i64) -> Result<Option<Donor>, DomainError> {
        let row = sqlx::query(
            "SELECT id, user_id, full_name, blood_type, phone, next_eligible_on, \
             created_at, updated_at FROM donors WHERE id = $1",
        )
        .bind(donor_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infra)?;
        row.as_ref().map(row_to_donor).transpose()
    }

    async fn insert(&self, donor: &Donor) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO donors \
             (id, user_id, full_name, blood_type, phone, next_eligible_on, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(donor.id)
        .bind(donor.user_id)
        .bind(&donor.full_name)
        .bind(donor.blood_type.as_str())
        .bind(&donor.phone)
        .bind(donor.next_eligible_on())
        .bind(donor.created_at)
        .bind(donor.updated_at)
        .execute(&self.pool)
        .await
        .map_err(infra)?;
        Ok(())
    }

    async fn update(&self, donor: &Donor) -> Result<(), DomainError> {
        sqlx::query(
            "UPDATE donors SET full_name = $2, blood_type = $3, phone = $4, \
             next_eligible_on = $5, updated_at = $6 WHERE id = $1",
        )
        .bind(donor.id)
        .bind(&donor.full_name)
        .bind(donor.blood_type.as_str())
        .bind(&donor.phone)
        .bind(donor.next_eligible_on())
        .bind(donor.updated_at)
        .execute(&self.pool)
        .await
        .map_err(infra)?;
        Ok(())
    }
}
