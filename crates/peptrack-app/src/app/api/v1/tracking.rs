use chrono::Utc;
use salvo::http::StatusCode;
use salvo::prelude::Json;
use salvo::{Depot, Request, Response, Router, handler};

use crate::app::api::extract::{json_body, query_param};
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;
use peptrack_core::constants::TRACKING_LOOKBACK_DAYS;
use peptrack_db::model::tracking::DailyTracking;
use peptrack_service::auth::depot::get_user_from_depot;
use peptrack_service::tracking::{self, TrackingRequest};

/// ## Summary
/// POST /tracking - Stores a daily entry; `date` overrides the timestamp.
///
/// ## Errors
/// 400 for an unparseable `date`, 422 for a malformed body.
#[handler]
async fn create_entry(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<DailyTracking>> {
    let user_id = get_user_from_depot(depot)?.id;
    let body: TrackingRequest = json_body(req).await?;
    let row = body.into_new_tracking(user_id)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let created = tracking::create(&mut conn, row).await?;

    res.status_code(StatusCode::CREATED);
    Ok(Json(created))
}

/// ## Summary
/// GET /tracking?start&end - Entries in the inclusive range, oldest first.
/// The range defaults to the last seven days.
#[handler]
async fn list_entries(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Vec<DailyTracking>>> {
    let user_id = get_user_from_depot(depot)?.id;
    let start = query_param(req, "start");
    let end = query_param(req, "end");
    let range = tracking::resolve_range(
        start.as_deref(),
        end.as_deref(),
        Utc::now(),
        TRACKING_LOOKBACK_DAYS,
    )?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let rows = tracking::list(&mut conn, user_id, range).await?;
    Ok(Json(rows))
}

/// GET /tracking/latest - The newest entry, or `null`.
#[handler]
async fn latest_entry(depot: &mut Depot) -> AppResult<Json<Option<DailyTracking>>> {
    let user_id = get_user_from_depot(depot)?.id;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(tracking::latest(&mut conn, user_id).await?))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("tracking")
        .get(list_entries)
        .post(create_entry)
        .push(Router::with_path("latest").get(latest_entry))
}
