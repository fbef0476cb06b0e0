//! Bearer-token authentication in front of the v1 resources.

use salvo::http::StatusCode;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn missing_token_is_unauthorized() {
    let service = create_test_service();

    let response = TestRequest::get("/api/v1/peptides")
        .send(service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    assert_eq!(response.detail(), "Not authenticated");
}

#[test_log::test(tokio::test)]
async fn non_bearer_scheme_is_unauthorized() {
    let service = create_test_service();

    let response = TestRequest::get("/api/v1/peptides")
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .send(service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    assert_eq!(response.detail(), "Not authenticated");
}

#[test_log::test(tokio::test)]
async fn rejected_token_is_unauthorized() {
    let service = create_test_service();

    let response = TestRequest::get("/api/v1/peptides")
        .bearer("forged")
        .send(service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    assert_eq!(response.detail(), "Invalid or expired token");
}

#[test_log::test(tokio::test)]
async fn accepted_token_reaches_the_handler() {
    let service = create_test_service();

    // The handler runs and fails on the unavailable pool.
    TestRequest::get("/api/v1/peptides")
        .authed()
        .send(service)
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[test_log::test(tokio::test)]
async fn bearer_scheme_is_case_insensitive() {
    let service = create_test_service();

    TestRequest::get("/api/v1/supplements")
        .header("Authorization", &format!("bearer {VALID_TOKEN}"))
        .send(service)
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[test_log::test(tokio::test)]
async fn missing_identity_provider_is_a_server_error() {
    let service = create_service_without_identity();

    let response = TestRequest::get("/api/v1/cycles")
        .authed()
        .send(service)
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    assert_eq!(response.detail(), "Identity provider not configured");
}

#[test_log::test(tokio::test)]
async fn query_token_is_ignored_outside_export() {
    let service = create_test_service();

    TestRequest::get(&format!("/api/v1/peptides?token={VALID_TOKEN}"))
        .send(service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
