//! `PostgreSQL` implementation of the donor match repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use hemolink_core::error::DomainError;
use hemolink_matching::domain::aggregates::{DonorMatch, MatchStatus};
use hemolink_matching::domain::repository::MatchRepository;

use crate::infra;

/// PostgreSQL-backed donor match repository.
#[derive(Debug, Clone)]
pub struct PgMatchRepository {
    pool: PgPool,
}

impl PgMatchRepository {
    /// Creates a new `PgMatchRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const MATCH_COLUMNS: &str = "id, request_id, donor_id, compatibility_score, distance_km, \
                             status, contacted_at, response, created_at, updated_at";

fn row_to_match(row: &PgRow) -> Result<DonorMatch, DomainError> {
    let status: String = row.try_get("status").map_err(infra)?;
    Ok(DonorMatch::rehydrate(
        row.try_get("id").map_err(infra)?,
        row.try_get("request_id").map_err(infra)?,
        row.try_get("donor_id").map_err(infra)?,
        row.try_get("compatibility_score").map_err(infra)?,
        row.try_get("distance_km").map_err(infra)?,
        status.parse::<MatchStatus>()?,
        row.try_get::<Option<DateTime<Utc>>, _>("contacted_at")
            .map_err(infra)?,
        row.try_get("response").map_err(infra)?,
        row.try_get::<DateTime<Utc>, _>("created_at").map_err(infra)?,
        row.try_get::<Option<DateTime<Utc>>, _>("updated_at")
            .map_err(infra)?,
    ))
}

#[async_trait]
impl MatchRepository for PgMatchRepository {
    async fn next_id(&self) -> Result<i64, DomainError> {
        let row =
            sqlx::query("SELECT nextval(pg_get_serial_sequence('donor_matches', 'id')) AS id")
                .fetch_one(&self.pool)
                .await
                .map_err(infra)?;
        row.try_get("id").map_err(infra)
    }

    async fn find_by_id(&self, match_id: i64) -> Result<Option<DonorMatch>, DomainError> {
        let sql = format!("SELECT {MATCH_COLUMNS} FROM donor_matches WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(match_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(infra)?;
        row.as_ref().map(row_to_match).transpose()
    }

    async fn list_by_request(&self, request_id: i64) -> Result<Vec<DonorMatch>, DomainError> {
        let sql =
            format!("SELECT {MATCH_COLUMNS} FROM donor_matches WHERE request_id = $1 ORDER BY id");
        let rows = sqlx::query(&sql)
            .bind(request_id)
            .fetch_all(&self.pool)
            .await
            .map_err(infra)?;
        rows.iter().map(row_to_match).collect()
    }

    async fn insert(&self, donor_match: &DonorMatch) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO donor_matches \
             (id, request_id, donor_id, compatibility_score, distance_km, status, \
              contacted_at, response, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(donor_match.id)
        .bind(donor_match.request_id)
        .bind(donor_match.donor_id)
        .bind(donor_match.compatibility_score)
        .bind(donor_match.distance_km)
        .bind(donor_match.status().as_str())
        .bind(donor_match.contacted_at)
        .bind(&donor_match.response)
        .bind(donor_match.created_at)
        .bind(donor_match.updated_at)
        .execute(&self.pool)
        .await
        .map_err(infra)?;
        Ok(())
    }

    async fn update(&self, donor_match: &DonorMatch) -> Result<(), DomainError> {
        sqlx::query(
            "UPDATE donor_matches SET status = $2, contacted_at = $3, response = $4, \
             updated_at = $5 WHERE id = $1",
        )
        .bind(donor_match.id)
        .bind(donor_match.status().as_str())
        .bind(donor_match.contacted_at)
        .bind(&donor_match.response)
        .bind(donor_match.updated_at)
        .execute(&self.pool)
        .await
        .map_err(infra)?;
        Ok(())
    }
}
