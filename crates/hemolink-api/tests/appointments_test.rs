//! Integration tests for the Appointment Scheduling bounded context.

mod common;

use axum::http::StatusCode;

/// Opens a request to hang appointments off and returns its id.
async fn open_request(app: axum::Router) -> i64 {
    let (_, json) = common::post_json(
        app,
        "/api/v1/requests",
        &serde_json::json!({
            "requester_id": 3,
            "blood_type": "B+",
            "quantity_units": 1,
            "latitude": 6.9271,
            "longitude": 79.8612,
            "address_id": null
        }),
    )
    .await;
    json["request_id"].as_i64().unwrap()
}

fn schedule_body(request_id: i64) -> serde_json::Value {
    // Two days after the fixed test clock.
    serde_json::json!({
        "request_id": request_id,
        "donor_id": 20,
        "location_id": 3,
        "scheduled_at": "2026-02-12T09:00:00Z",
        "notes": "bring ID",
        "created_by": 7
    })
}

#[tokio::test]
async fn test_schedule_appointment_round_trip() {
    let app = common::build_test_app();
    let request_id = open_request(app.clone()).await;

    let (status, json) =
        common::post_json(app.clone(), "/api/v1/appointments", &schedule_body(request_id)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["status"], "SCHEDULED");
    let appointment_id = json["appointment_id"].as_i64().unwrap();

    let (status, json) =
        common::get_json(app, &format!("/api/v1/appointments/{appointment_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["donor_id"], 20);
    assert_eq!(json["notes"], "bring ID");
    assert_eq!(json["scheduled_at"], "2026-02-12T09:00:00Z");
}

#[tokio::test]
async fn test_schedule_in_the_past_returns_422() {
    let app = common::build_test_app();
    let request_id = open_request(app.clone()).await;
    let mut body = schedule_body(request_id);
    body["scheduled_at"] = serde_json::json!("2026-02-09T09:00:00Z");

    let (status, json) = common::post_json(app, "/api/v1/appointments", &body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "rule_violation");
}

#[tokio::test]
async fn test_check_in_closes_the_appointment() {
    let app = common::build_test_app();
    let request_id = open_request(app.clone()).await;
    let (_, json) =
        common::post_json(app.clone(), "/api/v1/appointments", &schedule_body(request_id)).await;
    let appointment_id = json["appointment_id"].as_i64().unwrap();

    let (status, json) = common::post_json(
        app.clone(),
        &format!("/api/v1/appointments/{appointment_id}/check-in"),
        &serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "CHECKED_IN");

    // Checked-in is terminal.
    let (status, json) = common::post_json(
        app,
        &format!("/api/v1/appointments/{appointment_id}/cancel"),
        &serde_json::json!({ "reason": "too late" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "rule_violation");
}

#[tokio::test]
async fn test_no_show_unknown_appointment_returns_404() {
    let app = common::build_test_app();

    let (status, json) = common::post_json(
        app,
        "/api/v1/appointments/404/no-show",
        &serde_json::json!({}),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn test_list_appointments_for_request() {
    let app = common::build_test_app();
    let request_id = open_request(app.clone()).await;
    common::post_json(app.clone(), "/api/v1/appointments", &schedule_body(request_id)).await;

    let (status, json) =
        common::get_json(app, &format!("/api/v1/appointments?request_id={request_id}")).await;

    assert_eq!(status, StatusCode::OK);
    let appointments = json.as_array().unwrap();
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0]["status"], "SCHEDULED");
}
