//! Routes for the Blood Request bounded context.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hemolink_core::blood::BloodType;
use hemolink_requests::application::command_handlers::{
    handle_cancel_request, handle_fulfill_request, handle_open_request,
};
use hemolink_requests::application::query_handlers::{
    RequestView, get_request_by_id, list_open_requests,
};
use hemolink_requests::domain::commands::{CancelRequest, FulfillRequest, OpenRequest};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
struct OpenRequestBody {
    requester_id: i64,
    blood_type: BloodType,
    quantity_units: i32,
    latitude: f64,
    longitude: f64,
    address_id: Option<i64>,
}

#[derive(Serialize)]
struct RequestCommandResponse {
    request_id: i64,
    status: &'static str,
    events_published: usize,
}

/// POST /api/v1/requests
async fn open_request(
    State(state): State<AppState>,
    Json(body): Json<OpenRequestBody>,
) -> Result<(StatusCode, Json<RequestCommandResponse>), ApiError> {
    let command = OpenRequest {
        correlation_id: Uuid::new_v4(),
        requester_id: body.requester_id,
        blood_type: body.blood_type,
        quantity_units: body.quantity_units,
        latitude: body.latitude,
        longitude: body.longitude,
        address_id: body.address_id,
    };
    let result = handle_open_request(
        &command,
        state.requests.as_ref(),
        state.publisher.as_ref(),
        state.clock.as_ref(),
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(RequestCommandResponse {
            request_id: result.request_id,
            status: result.status.as_str(),
            events_published: result.events_published,
        }),
    ))
}

/// POST /api/v1/requests/{id}/fulfill
async fn fulfill_request(
    State(state): State<AppState>,
    Path(request_id): Path<i64>,
) -> Result<Json<RequestCommandResponse>, ApiError> {
    let command = FulfillRequest {
        correlation_id: Uuid::new_v4(),
        request_id,
    };
    let result = handle_fulfill_request(
        &command,
        state.requests.as_ref(),
        state.publisher.as_ref(),
        state.clock.as_ref(),
    )
    .await?;
    Ok(Json(RequestCommandResponse {
        request_id: result.request_id,
        status: result.status.as_str(),
        events_published: result.events_published,
    }))
}

#[derive(Deserialize, Default)]
struct CancelRequestBody {
    reason: Option<String>,
}

/// POST /api/v1/requests/{id}/cancel
async fn cancel_request(
    State(state): State<AppState>,
    Path(request_id): Path<i64>,
    Json(body): Json<CancelRequestBody>,
) -> Result<Json<RequestCommandResponse>, ApiError> {
    let command = CancelRequest {
        correlation_id: Uuid::new_v4(),
        request_id,
        reason: body.reason,
    };
    let result = handle_cancel_request(
        &command,
        state.requests.as_ref(),
        state.publisher.as_ref(),
        state.clock.as_ref(),
    )
    .await?;
    Ok(Json(RequestCommandResponse {
        request_id: result.request_id,
        status: result.status.as_str(),
        events_published: result.events_published,
    }))
}

/// GET /api/v1/requests/{id}
async fn get_request(
    State(state): State<AppState>,
    Path(request_id): Path<i64>,
) -> Result<Json<RequestView>, ApiError> {
    let view = get_request_by_id(request_id, state.requests.as_ref()).await?;
    Ok(Json(view))
}

/// GET /api/v1/requests
async fn list_requests(
    State(state): State<AppState>,
) -> Result<Json<Vec<RequestView>>, ApiError> {
    let views = list_open_requests(state.requests.as_ref()).await?;
    Ok(Json(views))
}

/// Returns the router for the blood request context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(open_request).get(list_requests))
        .route("/{id}", get(get_request))
        .route("/{id}/fulfill", post(fulfill_request))
        .route("/{id}/cancel", post(cancel_request))
}
