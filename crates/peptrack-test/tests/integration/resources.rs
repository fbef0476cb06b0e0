//! Peptides, supplements, cycles, labs and insights.

use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn blank_names_are_unprocessable() {
    let service = create_test_service();

    for (path, body, field) in [
        ("/api/v1/peptides", json!({ "name": "  " }), "name"),
        ("/api/v1/supplements", json!({ "name": "" }), "name"),
        ("/api/v1/cycles", json!({ "name": " " }), "name"),
        ("/api/v1/labs", json!({ "panel_name": "", "values": {} }), "panel_name"),
    ] {
        let response = TestRequest::post(path)
            .authed()
            .json(&body)
            .send(service)
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        assert_eq!(
            response.detail(),
            format!("Validation error: {field} must not be empty")
        );
    }
}

#[test_log::test(tokio::test)]
async fn unknown_cycle_status_is_unprocessable() {
    let service = create_test_service();

    TestRequest::post("/api/v1/cycles")
        .authed()
        .json(&json!({ "name": "Cut", "status": "abandoned" }))
        .send(service)
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[test_log::test(tokio::test)]
async fn item_routes_reject_non_uuid_ids() {
    let service = create_test_service();

    TestRequest::delete("/api/v1/peptides/42")
        .authed()
        .send(service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    TestRequest::patch("/api/v1/supplements/abc")
        .authed()
        .json(&json!({ "dose": "400mg" }))
        .send(service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    TestRequest::post("/api/v1/labs/xyz/summarize")
        .authed()
        .send(service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn insight_routes_are_mounted() {
    let service = create_test_service();

    TestRequest::get("/api/v1/insights")
        .authed()
        .send(service)
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);

    TestRequest::post("/api/v1/insights/generate")
        .authed()
        .send(service)
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[test_log::test(tokio::test)]
async fn unknown_route_is_not_found() {
    let service = create_test_service();

    TestRequest::get("/api/v1/nothing-here")
        .authed()
        .send(service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
