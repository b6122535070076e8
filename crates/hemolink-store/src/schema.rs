//! Database schema bootstrap.

use sqlx::PgPool;

use hemolink_core::error::DomainError;

/// SQL to create the donors table.
pub const CREATE_DONORS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS donors (
    id               BIGSERIAL PRIMARY KEY,
    user_id          BIGINT NOT NULL,
    full_name        TEXT NOT NULL,
    blood_type       TEXT NOT NULL,
    phone            TEXT,
    next_eligible_on DATE,
    created_at       TIMESTAMPTZ NOT NULL,
    updated_at       TIMESTAMPTZ
);
";

/// SQL to create the addresses table.
pub const CREATE_ADDRESSES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS addresses (
    id                  BIGSERIAL PRIMARY KEY,
    line                TEXT NOT NULL,
    district            TEXT,
    city                TEXT NOT NULL,
    province            TEXT,
    country             TEXT NOT NULL,
    postal_code         TEXT,
    geocode_normalized  TEXT,
    geocode_place_id    TEXT,
    geocode_confidence  DOUBLE PRECISION,
    latitude            DOUBLE PRECISION NOT NULL,
    longitude           DOUBLE PRECISION NOT NULL,
    created_at          TIMESTAMPTZ NOT NULL
);
";

/// SQL to create the blood requests table.
pub const CREATE_BLOOD_REQUESTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS blood_requests (
    id             BIGSERIAL PRIMARY KEY,
    requester_id   BIGINT NOT NULL,
    blood_type     TEXT NOT NULL,
    quantity_units INTEGER NOT NULL,
    latitude       DOUBLE PRECISION NOT NULL,
    longitude      DOUBLE PRECISION NOT NULL,
    address_id     BIGINT REFERENCES addresses (id),
    status         TEXT NOT NULL,
    created_at     TIMESTAMPTZ NOT NULL,
    updated_at     TIMESTAMPTZ
);

CREATE INDEX IF NOT EXISTS idx_blood_requests_status
    ON blood_requests (status);
";

/// SQL to create the donor matches table.
pub const CREATE_DONOR_MATCHES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS donor_matches (
    id                  BIGSERIAL PRIMARY KEY,
    request_id          BIGINT NOT NULL REFERENCES blood_requests (id),
    donor_id            BIGINT NOT NULL,
    compatibility_score DOUBLE PRECISION,
    distance_km         DOUBLE PRECISION NOT NULL,
    status              TEXT NOT NULL,
    contacted_at        TIMESTAMPTZ,
    response            TEXT,
    created_at          TIMESTAMPTZ NOT NULL,
    updated_at          TIMESTAMPTZ
);

CREATE INDEX IF NOT EXISTS idx_donor_matches_request_id
    ON donor_matches (request_id);
";

/// SQL to create the appointments table.
pub const CREATE_APPOINTMENTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS appointments (
    id           BIGSERIAL PRIMARY KEY,
    request_id   BIGINT NOT NULL REFERENCES blood_requests (id),
    donor_id     BIGINT NOT NULL,
    location_id  BIGINT,
    scheduled_at TIMESTAMPTZ NOT NULL,
    notes        TEXT,
    status       TEXT NOT NULL,
    created_by   BIGINT NOT NULL,
    created_at   TIMESTAMPTZ NOT NULL,
    updated_at   TIMESTAMPTZ
);

CREATE INDEX IF NOT EXISTS idx_appointments_request_id
    ON appointments (request_id);
";

/// SQL to create the posts table.
pub const CREATE_POSTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS posts (
    id           BIGSERIAL PRIMARY KEY,
    author_id    BIGINT NOT NULL,
    title        TEXT NOT NULL,
    slug         TEXT NOT NULL UNIQUE,
    body         TEXT NOT NULL,
    status       TEXT NOT NULL,
    published_at TIMESTAMPTZ,
    created_at   TIMESTAMPTZ NOT NULL,
    updated_at   TIMESTAMPTZ
);
";

/// Creates all tables if they do not exist. Run once at startup.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` when any DDL statement fails.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), DomainError> {
    for ddl in [
        CREATE_DONORS_TABLE,
        CREATE_ADDRESSES_TABLE,
        CREATE_BLOOD_REQUESTS_TABLE,
        CREATE_DONOR_MATCHES_TABLE,
        CREATE_APPOINTMENTS_TABLE,
        CREATE_POSTS_TABLE,
    ] {
        sqlx::raw_sql(ddl)
            .execute(pool)
            .await
            .map_err(|e| DomainError::Infrastructure(e.to_string()))?;
    }
    tracing::info!("database schema ensured");
    Ok(())
}
