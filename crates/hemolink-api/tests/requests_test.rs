//! Integration tests for the Blood Request bounded context.

mod common;

use axum::http::StatusCode;

fn open_body() -> serde_json::Value {
    serde_json::json!({
        "requester_id": 3,
        "blood_type": "AB+",
        "quantity_units": 2,
        "latitude": 6.9271,
        "longitude": 79.8612,
        "address_id": null
    })
}

#[tokio::test]
async fn test_open_request_round_trip() {
    let app = common::build_test_app();

    let (status, json) = common::post_json(app.clone(), "/api/v1/requests", &open_body()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["status"], "OPEN");
    assert_eq!(json["events_published"], 1);
    let request_id = json["request_id"].as_i64().unwrap();

    let (status, json) = common::get_json(app.clone(), &format!("/api/v1/requests/{request_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["blood_type"], "AB+");
    assert_eq!(json["quantity_units"], 2);

    // The new request shows up in the open list.
    let (status, json) = common::get_json(app, "/api/v1/requests").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_open_request_with_zero_quantity_returns_422() {
    let app = common::build_test_app();
    let mut body = open_body();
    body["quantity_units"] = serde_json::json!(0);

    let (status, json) = common::post_json(app, "/api/v1/requests", &body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "rule_violation");
}

#[tokio::test]
async fn test_open_request_with_out_of_range_latitude_returns_422() {
    let app = common::build_test_app();
    let mut body = open_body();
    body["latitude"] = serde_json::json!(91.0);

    let (status, _) = common::post_json(app, "/api/v1/requests", &body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_fulfilled_request_leaves_the_open_list() {
    let app = common::build_test_app();
    let (_, json) = common::post_json(app.clone(), "/api/v1/requests", &open_body()).await;
    let request_id = json["request_id"].as_i64().unwrap();

    let (status, json) = common::post_json(
        app.clone(),
        &format!("/api/v1/requests/{request_id}/fulfill"),
        &serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "FULFILLED");

    let (_, json) = common::get_json(app.clone(), "/api/v1/requests").await;
    assert!(json.as_array().unwrap().is_empty());

    // A fulfilled request cannot be cancelled.
    let (status, json) = common::post_json(
        app,
        &format!("/api/v1/requests/{request_id}/cancel"),
        &serde_json::json!({ "reason": "duplicate" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "rule_violation");
}

#[tokio::test]
async fn test_cancel_unknown_request_returns_404() {
    let app = common::build_test_app();

    let (status, json) = common::post_json(
        app,
        "/api/v1/requests/404/cancel",
        &serde_json::json!({ "reason": null }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");
}
