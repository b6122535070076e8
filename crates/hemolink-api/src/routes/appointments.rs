//! Routes for the Appointment Scheduling bounded context.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hemolink_scheduling::application::command_handlers::{
    handle_cancel_appointment, handle_check_in_donor, handle_mark_no_show,
    handle_schedule_appointment,
};
use hemolink_scheduling::application::query_handlers::{
    AppointmentView, get_appointment_by_id, list_appointments_for_request,
};
use hemolink_scheduling::domain::commands::{
    CancelAppointment, CheckInDonor, MarkNoShow, ScheduleAppointment,
};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
struct ScheduleAppointmentBody {
    request_id: i64,
    donor_id: i64,
    location_id: Option<i64>,
    scheduled_at: DateTime<Utc>,
    notes: Option<String>,
    created_by: i64,
}

#[derive(Serialize)]
struct AppointmentCommandResponse {
    appointment_id: i64,
    status: &'static str,
    events_published: usize,
}

/// POST /api/v1/appointments
async fn schedule_appointment(
    State(state): State<AppState>,
    Json(body): Json<ScheduleAppointmentBody>,
) -> Result<(StatusCode, Json<AppointmentCommandResponse>), ApiError> {
    let command = ScheduleAppointment {
        correlation_id: Uuid::new_v4(),
        request_id: body.request_id,
        donor_id: body.donor_id,
        location_id: body.location_id,
        scheduled_at: body.scheduled_at,
        notes: body.notes,
        created_by: body.created_by,
    };
    let result = handle_schedule_appointment(
        &command,
        state.appointments.as_ref(),
        state.publisher.as_ref(),
        state.clock.as_ref(),
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(AppointmentCommandResponse {
            appointment_id: result.appointment_id,
            status: result.status.as_str(),
            events_published: result.events_published,
        }),
    ))
}

/// POST /api/v1/appointments/{id}/check-in
async fn check_in(
    State(state): State<AppState>,
    Path(appointment_id): Path<i64>,
) -> Result<Json<AppointmentCommandResponse>, ApiError> {
    let command = CheckInDonor {
        correlation_id: Uuid::new_v4(),
        appointment_id,
    };
    let result = handle_check_in_donor(
        &command,
        state.appointments.as_ref(),
        state.publisher.as_ref(),
        state.clock.as_ref(),
    )
    .await?;
    Ok(Json(AppointmentCommandResponse {
        appointment_id: result.appointment_id,
        status: result.status.as_str(),
        events_published: result.events_published,
    }))
}

/// POST /api/v1/appointments/{id}/no-show
async fn mark_no_show(
    State(state): State<AppState>,
    Path(appointment_id): Path<i64>,
) -> Result<Json<AppointmentCommandResponse>, ApiError> {
    let command = MarkNoShow {
        correlation_id: Uuid::new_v4(),
        appointment_id,
    };
    let result = handle_mark_no_show(
        &command,
        state.appointments.as_ref(),
        state.publisher.as_ref(),
        state.clock.as_ref(),
    )
    .await?;
    Ok(Json(AppointmentCommandResponse {
        appointment_id: result.appointment_id,
        status: result.status.as_str(),
        events_published: result.events_published,
    }))
}

#[derive(Deserialize, Default)]
struct CancelAppointmentBody {
    reason: Option<String>,
}

/// POST /api/v1/appointments/{id}/cancel
async fn cancel_appointment(
    State(state): State<AppState>,
    Path(appointment_id): Path<i64>,
    Json(body): Json<CancelAppointmentBody>,
) -> Result<Json<AppointmentCommandResponse>, ApiError> {
    let command = CancelAppointment {
        correlation_id: Uuid::new_v4(),
        appointment_id,
        reason: body.reason,
    };
    let result = handle_cancel_appointment(
        &command,
        state.appointments.as_ref(),
        state.publisher.as_ref(),
        state.clock.as_ref(),
    )
    .await?;
    Ok(Json(AppointmentCommandResponse {
        appointment_id: result.appointment_id,
        status: result.status.as_str(),
        events_published: result.events_published,
    }))
}

/// GET /api/v1/appointments/{id}
async fn get_appointment(
    State(state): State<AppState>,
    Path(appointment_id): Path<i64>,
) -> Result<Json<AppointmentView>, ApiError> {
    let view = get_appointment_by_id(appointment_id, state.appointments.as_ref()).await?;
    Ok(Json(view))
}

#[derive(Deserialize)]
struct ListAppointmentsParams {
    request_id: i64,
}

/// GET /api/v1/appointments?request_id={id}
async fn list_appointments(
    State(state): State<AppState>,
    Query(params): Query<ListAppointmentsParams>,
) -> Result<Json<Vec<AppointmentView>>, ApiError> {
    let views =
        list_appointments_for_request(params.request_id, state.appointments.as_ref()).await?;
    Ok(Json(views))
}

/// Returns the router for the scheduling context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(schedule_appointment).get(list_appointments))
        .route("/{id}", get(get_appointment))
        .route("/{id}/check-in", post(check_in))
        .route("/{id}/no-show", post(mark_no_show))
        .route("/{id}/cancel", post(cancel_appointment))
}
