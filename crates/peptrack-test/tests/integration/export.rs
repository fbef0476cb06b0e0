//! Export routes, which accept `?token=` as well as the header.

use salvo::http::StatusCode;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn export_accepts_query_token() {
    let service = create_test_service();

    TestRequest::get(&format!("/api/v1/export/csv?token={VALID_TOKEN}"))
        .send(service)
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[test_log::test(tokio::test)]
async fn query_token_wins_over_header() {
    let service = create_test_service();

    TestRequest::get(&format!("/api/v1/export/pdf?token={VALID_TOKEN}"))
        .bearer("forged")
        .send(service)
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let response = TestRequest::get("/api/v1/export/pdf?token=forged")
        .authed()
        .send(service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.detail(), "Invalid or expired token");
}

#[test_log::test(tokio::test)]
async fn export_without_any_token_is_unauthorized() {
    let service = create_test_service();

    TestRequest::get("/api/v1/export/csv")
        .send(service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[test_log::test(tokio::test)]
async fn malformed_export_range_is_bad_request() {
    let service = create_test_service();

    let response = TestRequest::get("/api/v1/export/csv?start=last-tuesday")
        .authed()
        .send(service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(response.detail(), "Invalid start/end format. Use ISO 8601.");
}

#[test_log::test(tokio::test)]
async fn well_formed_export_range_reaches_storage() {
    let service = create_test_service();

    TestRequest::get("/api/v1/export/pdf?start=2024-01-01&end=2024-01-31T23:59:59Z")
        .authed()
        .send(service)
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}
