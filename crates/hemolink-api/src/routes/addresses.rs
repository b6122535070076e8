//! Routes for stored addresses (Blood Request bounded context).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hemolink_requests::application::command_handlers::handle_create_address;
use hemolink_requests::application::query_handlers::{AddressView, get_address_by_id};
use hemolink_requests::domain::address::GeocodingResult;
use hemolink_requests::domain::commands::CreateAddress;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
struct CreateAddressBody {
    line: String,
    district: Option<String>,
    city: String,
    province: Option<String>,
    country: String,
    postal_code: Option<String>,
    geocoding: Option<GeocodingResult>,
    latitude: f64,
    longitude: f64,
}

#[derive(Serialize)]
struct AddressCommandResponse {
    address_id: i64,
}

/// POST /api/v1/addresses
async fn create_address(
    State(state): State<AppState>,
    Json(body): Json<CreateAddressBody>,
) -> Result<(StatusCode, Json<AddressCommandResponse>), ApiError> {
    let command = CreateAddress {
        correlation_id: Uuid::new_v4(),
        line: body.line,
        district: body.district,
        city: body.city,
        province: body.province,
        country: body.country,
        postal_code: body.postal_code,
        geocoding: body.geocoding,
        latitude: body.latitude,
        longitude: body.longitude,
    };
    let result = handle_create_address(&command, state.requests.as_ref(), state.clock.as_ref())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(AddressCommandResponse {
            address_id: result.address_id,
        }),
    ))
}

/// GET /api/v1/addresses/{id}
async fn get_address(
    State(state): State<AppState>,
    Path(address_id): Path<i64>,
) -> Result<Json<AddressView>, ApiError> {
    let view = get_address_by_id(address_id, state.requests.as_ref()).await?;
    Ok(Json(view))
}

/// Returns the router for stored addresses.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_address))
        .route("/{id}", get(get_address))
}
