//! Tracking validation that happens before the database is touched.

use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn unparseable_entry_date_is_bad_request() {
    let service = create_test_service();

    let response = TestRequest::post("/api/v1/tracking")
        .authed()
        .json(&json!({ "date": "03/01/2024", "weight_lbs": 180.5 }))
        .send(service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(response.detail(), "Invalid date format. Use ISO 8601.");
}

#[test_log::test(tokio::test)]
async fn valid_entry_proceeds_to_storage() {
    let service = create_test_service();

    TestRequest::post("/api/v1/tracking")
        .authed()
        .json(&json!({
            "date": "2024-03-01",
            "weight_lbs": 180.5,
            "body_fat_percent": 18.2,
            "resting_hr": 58,
            "energy": 7
        }))
        .send(service)
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[test_log::test(tokio::test)]
async fn malformed_listing_range_is_bad_request() {
    let service = create_test_service();

    let response = TestRequest::get("/api/v1/tracking?start=2024-01-01&end=soon")
        .authed()
        .send(service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(response.detail(), "Invalid start/end format. Use ISO 8601.");
}

#[test_log::test(tokio::test)]
async fn non_json_body_is_unprocessable() {
    let service = create_test_service();

    let response = TestRequest::post("/api/v1/tracking")
        .authed()
        .header("Content-Type", "application/json")
        .body("{not json")
        .send(service)
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    assert!(response.detail().starts_with("Invalid request body"));
}

#[test_log::test(tokio::test)]
async fn well_formed_listing_range_reaches_storage() {
    let service = create_test_service();

    TestRequest::get("/api/v1/tracking?start=2024-01-01&end=2024-01-07")
        .authed()
        .send(service)
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}
