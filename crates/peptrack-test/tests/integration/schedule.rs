//! Schedule routes: window bounds and payload validation.

use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn upcoming_days_outside_window_is_unprocessable() {
    let service = create_test_service();

    for days in ["0", "61", "-3"] {
        TestRequest::get(&format!("/api/v1/schedule/upcoming?days={days}"))
            .authed()
            .send(service)
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }
}

#[test_log::test(tokio::test)]
async fn upcoming_days_must_be_an_integer() {
    let service = create_test_service();

    TestRequest::get("/api/v1/schedule/upcoming?days=week")
        .authed()
        .send(service)
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[test_log::test(tokio::test)]
async fn upcoming_window_edges_are_accepted() {
    let service = create_test_service();

    for path in [
        "/api/v1/schedule/upcoming",
        "/api/v1/schedule/upcoming?days=1",
        "/api/v1/schedule/upcoming?days=60",
    ] {
        TestRequest::get(path)
            .authed()
            .send(service)
            .await
            .assert_status(StatusCode::SERVICE_UNAVAILABLE);
    }
}

#[test_log::test(tokio::test)]
async fn weekday_out_of_range_is_unprocessable() {
    let service = create_test_service();

    TestRequest::post("/api/v1/schedule")
        .authed()
        .json(&json!({
            "name": "BPC-157",
            "frequency": "weekly",
            "weekday": 7,
            "start_date": "2024-01-01"
        }))
        .send(service)
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[test_log::test(tokio::test)]
async fn malformed_time_of_day_is_unprocessable() {
    let service = create_test_service();

    TestRequest::post("/api/v1/schedule")
        .authed()
        .json(&json!({
            "name": "Magnesium",
            "frequency": "daily",
            "start_date": "2024-01-01",
            "time_of_day": "8pm"
        }))
        .send(service)
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[test_log::test(tokio::test)]
async fn malformed_start_date_is_unprocessable() {
    let service = create_test_service();

    TestRequest::post("/api/v1/schedule")
        .authed()
        .json(&json!({
            "name": "Magnesium",
            "frequency": "daily",
            "start_date": "January 1st"
        }))
        .send(service)
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[test_log::test(tokio::test)]
async fn valid_schedule_proceeds_to_storage() {
    let service = create_test_service();

    TestRequest::post("/api/v1/schedule")
        .authed()
        .json(&json!({
            "name": "BPC-157",
            "item_type": "peptide",
            "dose": "250mcg",
            "frequency": "weekly",
            "weekday": 2,
            "start_date": "2024-01-01",
            "time_of_day": "08:00"
        }))
        .send(service)
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[test_log::test(tokio::test)]
async fn pause_with_non_uuid_id_is_bad_request() {
    let service = create_test_service();

    let response = TestRequest::patch("/api/v1/schedule/not-a-uuid/pause")
        .authed()
        .send(service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(response.detail(), "Invalid id");
}
