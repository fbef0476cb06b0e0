//! Unauthenticated health endpoints.

use salvo::http::StatusCode;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn root_health_reports_liveness() {
    let service = create_test_service();

    let response = TestRequest::get("/health")
        .send(service)
        .await
        .assert_status(StatusCode::OK);

    let body = response.json();
    assert_eq!(body["ok"], true);
    assert_eq!(body["service"], "peptrack");
}

#[test_log::test(tokio::test)]
async fn versioned_health_reports_environment_and_identity() {
    let service = create_test_service();

    let response = TestRequest::get("/api/v1/health")
        .send(service)
        .await
        .assert_status(StatusCode::OK);

    let body = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["environment"], "test");
    assert_eq!(body["identity_configured"], true);
    assert!(body["version"].is_string());
}

#[test_log::test(tokio::test)]
async fn health_needs_no_token_even_without_identity() {
    let service = create_service_without_identity();

    TestRequest::get("/api/v1/health")
        .send(service)
        .await
        .assert_status(StatusCode::OK);
}

#[test_log::test(tokio::test)]
async fn ping_db_surfaces_database_failure() {
    let service = create_test_service();

    let response = TestRequest::get("/api/v1/ping-db")
        .send(service)
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    assert!(
        response.detail().starts_with("Pool error"),
        "unexpected detail: {}",
        response.detail()
    );
}
