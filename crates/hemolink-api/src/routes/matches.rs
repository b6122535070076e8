//! Routes for the Donor Matching bounded context.
//!
//! Proposing a match crosses contexts: the request's stored coordinates and
//! the donor's submitted coordinates feed the haversine distance that the
//! match records.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hemolink_core::error::DomainError;
use hemolink_matching::application::command_handlers::{
    handle_accept_match, handle_decline_match, handle_mark_contacted, handle_mark_no_answer,
    handle_propose_match,
};
use hemolink_matching::application::query_handlers::{
    MatchView, get_match_by_id, list_matches_for_request,
};
use hemolink_matching::domain::commands::{
    AcceptMatch, DeclineMatch, MarkMatchContacted, MarkMatchNoAnswer, ProposeMatch,
};
use hemolink_requests::domain::address::GeoLocation;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
struct ProposeMatchBody {
    request_id: i64,
    donor_id: i64,
    compatibility_score: Option<f64>,
    donor_latitude: f64,
    donor_longitude: f64,
}

#[derive(Serialize)]
struct MatchCommandResponse {
    match_id: i64,
    status: &'static str,
    events_published: usize,
}

/// POST /api/v1/matches
async fn propose_match(
    State(state): State<AppState>,
    Json(body): Json<ProposeMatchBody>,
) -> Result<(StatusCode, Json<MatchCommandResponse>), ApiError> {
    let request = state
        .requests
        .find_by_id(body.request_id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "request",
            id: body.request_id,
        })?;
    let donor_location = GeoLocation::new(body.donor_latitude, body.donor_longitude)?;
    let distance_km = request.location.distance_km(&donor_location);

    let command = ProposeMatch {
        correlation_id: Uuid::new_v4(),
        request_id: body.request_id,
        donor_id: body.donor_id,
        compatibility_score: body.compatibility_score,
        distance_km,
    };
    let result = handle_propose_match(
        &command,
        state.matches.as_ref(),
        state.publisher.as_ref(),
        state.clock.as_ref(),
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(MatchCommandResponse {
            match_id: result.match_id,
            status: result.status.as_str(),
            events_published: result.events_published,
        }),
    ))
}

/// POST /api/v1/matches/{id}/contact
async fn mark_contacted(
    State(state): State<AppState>,
    Path(match_id): Path<i64>,
) -> Result<Json<MatchCommandResponse>, ApiError> {
    let command = MarkMatchContacted {
        correlation_id: Uuid::new_v4(),
        match_id,
    };
    let result = handle_mark_contacted(
        &command,
        state.matches.as_ref(),
        state.publisher.as_ref(),
        state.clock.as_ref(),
    )
    .await?;
    Ok(Json(MatchCommandResponse {
        match_id: result.match_id,
        status: result.status.as_str(),
        events_published: result.events_published,
    }))
}

/// POST /api/v1/matches/{id}/accept
async fn accept_match(
    State(state): State<AppState>,
    Path(match_id): Path<i64>,
) -> Result<Json<MatchCommandResponse>, ApiError> {
    let command = AcceptMatch {
        correlation_id: Uuid::new_v4(),
        match_id,
    };
    let result = handle_accept_match(
        &command,
        state.matches.as_ref(),
        state.publisher.as_ref(),
        state.clock.as_ref(),
    )
    .await?;
    Ok(Json(MatchCommandResponse {
        match_id: result.match_id,
        status: result.status.as_str(),
        events_published: result.events_published,
    }))
}

#[derive(Deserialize, Default)]
struct DeclineMatchBody {
    reason: Option<String>,
}

/// POST /api/v1/matches/{id}/decline
async fn decline_match(
    State(state): State<AppState>,
    Path(match_id): Path<i64>,
    Json(body): Json<DeclineMatchBody>,
) -> Result<Json<MatchCommandResponse>, ApiError> {
    let command = DeclineMatch {
        correlation_id: Uuid::new_v4(),
        match_id,
        reason: body.reason,
    };
    let result = handle_decline_match(
        &command,
        state.matches.as_ref(),
        state.publisher.as_ref(),
        state.clock.as_ref(),
    )
    .await?;
    Ok(Json(MatchCommandResponse {
        match_id: result.match_id,
        status: result.status.as_str(),
        events_published: result.events_published,
    }))
}

/// POST /api/v1/matches/{id}/no-answer
async fn mark_no_answer(
    State(state): State<AppState>,
    Path(match_id): Path<i64>,
) -> Result<Json<MatchCommandResponse>, ApiError> {
    let command = MarkMatchNoAnswer {
        correlation_id: Uuid::new_v4(),
        match_id,
    };
    let result = handle_mark_no_answer(
        &command,
        state.matches.as_ref(),
        state.publisher.as_ref(),
        state.clock.as_ref(),
    )
    .await?;
    Ok(Json(MatchCommandResponse {
        match_id: result.match_id,
        status: result.status.as_str(),
        events_published: result.events_published,
    }))
}

/// GET /api/v1/matches/{id}
async fn get_match(
    State(state): State<AppState>,
    Path(match_id): Path<i64>,
) -> Result<Json<MatchView>, ApiError> {
    let view = get_match_by_id(match_id, state.matches.as_ref()).await?;
    Ok(Json(view))
}

#[derive(Deserialize)]
struct ListMatchesParams {
    request_id: i64,
}

/// GET /api/v1/matches?request_id={id}
async fn list_matches(
    State(state): State<AppState>,
    Query(params): Query<ListMatchesParams>,
) -> Result<Json<Vec<MatchView>>, ApiError> {
    let views = list_matches_for_request(params.request_id, state.matches.as_ref()).await?;
    Ok(Json(views))
}

/// Returns the router for the matching context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(propose_match).get(list_matches))
        .route("/{id}", get(get_match))
        .route("/{id}/contact", post(mark_contacted))
        .route("/{id}/accept", post(accept_match))
        .route("/{id}/decline", post(decline_match))
        .route("/{id}/no-answer", post(mark_no_answer))
}
