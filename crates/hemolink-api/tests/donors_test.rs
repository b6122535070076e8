//! Integration tests for the Donor bounded context.

mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_register_donor_round_trip() {
    let app = common::build_test_app();

    let (status, json) = common::post_json(
        app.clone(),
        "/api/v1/donors",
        &serde_json::json!({
            "user_id": 7,
            "full_name": "Amal Perera",
            "blood_type": "O-",
            "phone": "+94 77 123 4567"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["events_published"], 1);
    let donor_id = json["donor_id"].as_i64().unwrap();

    let (status, json) = common::get_json(app, &format!("/api/v1/donors/{donor_id}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["full_name"], "Amal Perera");
    assert_eq!(json["blood_type"], "O-");
    // No donation recorded yet, so the donor is eligible.
    assert_eq!(json["eligible"], true);
    assert!(json["next_eligible_on"].is_null());
}

#[tokio::test]
async fn test_register_donor_with_blank_name_returns_400() {
    let app = common::build_test_app();

    let (status, json) = common::post_json(
        app,
        "/api/v1/donors",
        &serde_json::json!({
            "user_id": 7,
            "full_name": "   ",
            "blood_type": "A+",
            "phone": null
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn test_record_donation_starts_deferral() {
    let app = common::build_test_app();
    let (_, json) = common::post_json(
        app.clone(),
        "/api/v1/donors",
        &serde_json::json!({
            "user_id": 7,
            "full_name": "Amal Perera",
            "blood_type": "O-",
            "phone": null
        }),
    )
    .await;
    let donor_id = json["donor_id"].as_i64().unwrap();

    // Donation on the fixed-clock date: 2026-02-10.
    let (status, _) = common::post_json(
        app.clone(),
        &format!("/api/v1/donors/{donor_id}/donations"),
        &serde_json::json!({ "donated_on": "2026-02-10" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = common::get_json(app.clone(), &format!("/api/v1/donors/{donor_id}")).await;
    assert_eq!(status, StatusCode::OK);
    // 56-day whole-blood deferral.
    assert_eq!(json["next_eligible_on"], "2026-04-07");
    assert_eq!(json["eligible"], false);

    // A second donation inside the window is refused.
    let (status, json) = common::post_json(
        app,
        &format!("/api/v1/donors/{donor_id}/donations"),
        &serde_json::json!({ "donated_on": "2026-02-11" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "rule_violation");
}

#[tokio::test]
async fn test_get_unknown_donor_returns_404() {
    let app = common::build_test_app();

    let (status, json) = common::get_json(app, "/api/v1/donors/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");
}
