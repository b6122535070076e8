//! Routes for the Donor bounded context.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hemolink_core::blood::BloodType;
use hemolink_donors::application::command_handlers::{
    handle_record_donation, handle_register_donor,
};
use hemolink_donors::application::query_handlers::{DonorView, get_donor_by_id};
use hemolink_donors::domain::commands::{RecordDonation, RegisterDonor};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
struct RegisterDonorBody {
    user_id: i64,
    full_name: String,
    blood_type: BloodType,
    phone: Option<String>,
}

#[derive(Serialize)]
struct DonorCommandResponse {
    donor_id: i64,
    events_published: usize,
}

/// POST /api/v1/donors
async fn register_donor(
    State(state): State<AppState>,
    Json(body): Json<RegisterDonorBody>,
) -> Result<(StatusCode, Json<DonorCommandResponse>), ApiError> {
    let command = RegisterDonor {
        correlation_id: Uuid::new_v4(),
        user_id: body.user_id,
        full_name: body.full_name,
        blood_type: body.blood_type,
        phone: body.phone,
    };
    let result = handle_register_donor(
        &command,
        state.donors.as_ref(),
        state.publisher.as_ref(),
        state.clock.as_ref(),
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(DonorCommandResponse {
            donor_id: result.donor_id,
            events_published: result.events_published,
        }),
    ))
}

#[derive(Deserialize)]
struct RecordDonationBody {
    donated_on: NaiveDate,
}

/// POST /api/v1/donors/{id}/donations
async fn record_donation(
    State(state): State<AppState>,
    Path(donor_id): Path<i64>,
    Json(body): Json<RecordDonationBody>,
) -> Result<Json<DonorCommandResponse>, ApiError> {
    let command = RecordDonation {
        correlation_id: Uuid::new_v4(),
        donor_id,
        donated_on: body.donated_on,
    };
    let result = handle_record_donation(
        &command,
        state.donors.as_ref(),
        state.publisher.as_ref(),
        state.clock.as_ref(),
    )
    .await?;
    Ok(Json(DonorCommandResponse {
        donor_id: result.donor_id,
        events_published: result.events_published,
    }))
}

/// GET /api/v1/donors/{id}
async fn get_donor(
    State(state): State<AppState>,
    Path(donor_id): Path<i64>,
) -> Result<Json<DonorView>, ApiError> {
    let view = get_donor_by_id(donor_id, state.donors.as_ref(), state.clock.as_ref()).await?;
    Ok(Json(view))
}

/// Returns the router for the donor context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(register_donor))
        .route("/{id}", get(get_donor))
        .route("/{id}/donations", post(record_donation))
}
