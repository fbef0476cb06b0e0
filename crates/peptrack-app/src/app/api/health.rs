use diesel_async::RunQueryDsl;
use salvo::http::StatusCode;
use salvo::prelude::Json;
use salvo::{Depot, Response, Router, handler};
use serde::Serialize;

use crate::config::get_config_from_depot;
use crate::db_handler::get_db_from_depot;
use crate::error::{AppResult, ErrorResponse};
use peptrack_core::constants::{SERVICE_NAME, SERVICE_VERSION};

#[derive(Debug, Serialize)]
struct Liveness {
    ok: bool,
    service: &'static str,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    environment: String,
    identity_configured: bool,
}

#[handler]
async fn liveness() -> Json<Liveness> {
    Json(Liveness {
        ok: true,
        service: SERVICE_NAME,
    })
}

/// ## Summary
/// Reports the version, environment and whether bearer tokens can be
/// verified.
#[handler]
async fn health(depot: &mut Depot) -> AppResult<Json<HealthResponse>> {
    let config = get_config_from_depot(depot)?;
    Ok(Json(HealthResponse {
        status: "ok",
        version: SERVICE_VERSION,
        environment: config.app.environment.clone(),
        identity_configured: config.identity.is_configured(),
    }))
}

/// ## Summary
/// Runs `SELECT 1` against the pool.
///
/// ## Errors
/// Responds 500 with the failure message when the database is unreachable.
#[handler]
async fn ping_db(depot: &mut Depot, res: &mut Response) {
    let outcome = async {
        let provider = get_db_from_depot(depot).map_err(|err| err.to_string())?;
        let mut conn = provider
            .get_connection()
            .await
            .map_err(|err| err.to_string())?;
        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map_err(|err| err.to_string())
    }
    .await;

    match outcome {
        Ok(_) => res.render(Json(serde_json::json!({ "ok": true }))),
        Err(detail) => {
            tracing::error!(error = %detail, "Database ping failed");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse { detail }));
        }
    }
}

/// `/health` outside the versioned prefix, for uptime checks.
#[must_use]
pub fn root_routes() -> Router {
    Router::with_path("health").get(liveness)
}

#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(Router::with_path("health").get(health))
        .push(Router::with_path("ping-db").get(ping_db))
}
