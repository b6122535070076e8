//! `PostgreSQL` implementation of the blood request repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use hemolink_core::blood::BloodType;
use hemolink_core::error::DomainError;
use hemolink_requests::domain::address::{Address, GeoLocation, GeocodingResult};
use hemolink_requests::domain::aggregates::{BloodRequest, RequestStatus};
use hemolink_requests::domain::repository::RequestRepository;

use crate::infra;

/// PostgreSQL-backed blood request repository.
#[derive(Debug, Clone)]
pub struct PgRequestRepository {
    pool: PgPool,
}

impl PgRequestRepository {
    /// Creates a new `PgRequestRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const REQUEST_COLUMNS: &str = "id, requester_id, blood_type, quantity_units, latitude, \
                               longitude, address_id, status, created_at, updated_at";

fn row_to_request(row: &PgRow) -> Result<BloodRequest, DomainError> {
    let blood_type: String = row.try_get("blood_type").map_err(infra)?;
    let status: String = row.try_get("status").map_err(infra)?;
    let location = GeoLocation::new(
        row.try_get("latitude").map_err(infra)?,
        row.try_get("longitude").map_err(infra)?,
    )?;
    Ok(BloodRequest::rehydrate(
        row.try_get("id").map_err(infra)?,
        row.try_get("requester_id").map_err(infra)?,
        blood_type.parse::<BloodType>()?,
        row.try_get("quantity_units").map_err(infra)?,
        location,
        row.try_get("address_id").map_err(infra)?,
        status.parse::<RequestStatus>()?,
        row.try_get::<DateTime<Utc>, _>("created_at").map_err(infra)?,
        row.try_get::<Option<DateTime<Utc>>, _>("updated_at")
            .map_err(infra)?,
    ))
}

fn row_to_address(row: &PgRow) -> Result<Address, DomainError> {
    let location = GeoLocation::new(
        row.try_get("latitude").map_err(infra)?,
        row.try_get("longitude").map_err(infra)?,
    )?;
    let geocoding = row
        .try_get::<Option<String>, _>("geocode_place_id")
        .map_err(infra)?
        .map(|place_id| {
            Ok::<_, DomainError>(GeocodingResult {
                normalized_address: row
                    .try_get::<Option<String>, _>("geocode_normalized")
                    .map_err(infra)?
                    .unwrap_or_default(),
                place_id,
                confidence: row.try_get("geocode_confidence").map_err(infra)?,
            })
        })
        .transpose()?;
    Ok(Address::rehydrate(
        row.try_get("id").map_err(infra)?,
        row.try_get("line").map_err(infra)?,
        row.try_get("district").map_err(infra)?,
        row.try_get("city").map_err(infra)?,
        row.try_get("province").map_err(infra)?,
        row.try_get("country").map_err(infra)?,
        row.try_get("postal_code").map_err(infra)?,
        geocoding,
        location,
        row.try_get::<DateTime<Utc>, _>("created_at").map_err(infra)?,
    ))
}

#[async_trait]
impl RequestRepository for PgRequestRepository {
    async fn next_id(&self) -> Result<i64, DomainError> {
        let row =
            sqlx::query("SELECT nextval(pg_get_serial_sequence('blood_requests', 'id')) AS id")
                .fetch_one(&self.pool)
                .await
                .map_err(infra)?;
        row.try_get("id").map_err(infra)
    }

    async fn find_by_id(&self, request_id: i64) -> Result<Option<BloodRequest>, DomainError> {
        let sql = format!("SELECT {REQUEST_COLUMNS} FROM blood_requests WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(request_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(infra)?;
        row.as_ref().map(row_to_request).transpose()
    }

    async fn list_open(&self) -> Result<Vec<BloodRequest>, DomainError> {
        let sql = format!(
            "SELECT {REQUEST_COLUMNS} FROM blood_requests WHERE status = 'OPEN' ORDER BY id"
        );
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(infra)?;
        rows.iter().map(row_to_request).collect()
    }

    async fn insert(&self, request: &BloodRequest) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO blood_requests \
             (id, requester_id, blood_type, quantity_units, latitude, longitude, \
              address_id, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(request.id)
        .bind(request.requester_id)
        .bind(request.blood_type.as_str())
        .bind(request.quantity_units)
        .bind(request.location.latitude())
        .bind(request.location.longitude())
        .bind(request.address_id)
        .bind(request.status().as_str())
        .bind(request.created_at)
        .bind(request.updated_at)
        .execute(&self.pool)
        .await
        .map_err(infra)?;
        Ok(())
    }

    async fn update(&self, request: &BloodRequest) -> Result<(), DomainError> {
        sqlx::query(
            "UPDATE blood_requests SET quantity_units = $2, status = $3, updated_at = $4 \
             WHERE id = $1",
        )
        .bind(request.id)
        .bind(request.quantity_units)
        .bind(request.status().as_str())
        .bind(request.updated_at)
        .execute(&self.pool)
        .await
        .map_err(infra)?;
        Ok(())
    }

    async fn next_address_id(&self) -> Result<i64, DomainError> {
        let row = sqlx::query("SELECT nextval(pg_get_serial_sequence('addresses', 'id')) AS id")
            .fetch_one(&self.pool)
            .await
            .map_err(infra)?;
        row.try_get("id").map_err(infra)
    }

    async fn insert_address(&self, address: &Address) -> Result<(), DomainError> {
        let (normalized, place_id, confidence) = match &address.geocoding {
            Some(g) => (
                Some(g.normalized_address.clone()),
                Some(g.place_id.clone()),
                g.confidence,
            ),
            None => (None, None, None),
        };
        sqlx::query(
            "INSERT INTO addresses \
             (id, line, district, city, province, country, postal_code, \
              geocode_normalized, geocode_place_id, geocode_confidence, \
              latitude, longitude, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
        )
        .bind(address.id)
        .bind(&address.line)
        .bind(&address.district)
        .bind(&address.city)
        .bind(&address.province)
        .bind(&address.country)
        .bind(&address.postal_code)
        .bind(normalized)
        .bind(place_id)
        .bind(confidence)
        .bind(address.location.latitude())
        .bind(address.location.longitude())
        .bind(address.created_at)
        .execute(&self.pool)
        .await
        .map_err(infra)?;
        Ok(())
    }

    async fn find_address(&self, address_id: i64) -> Result<Option<Address>, DomainError> {
        let row = sqlx::query(
            "SELECT id, line, district, city, province, country, postal_code, \
             geocode_normalized, geocode_place_id, geocode_confidence, \
             latitude, longitude, created_at FROM addresses WHERE id = $1",
        )
        .bind(address_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infra)?;
        row.as_ref().map(row_to_address).transpose()
    }
}
