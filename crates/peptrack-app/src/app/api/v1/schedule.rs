use chrono::Utc;
use salvo::http::StatusCode;
use salvo::prelude::Json;
use salvo::{Depot, Request, Response, Router, handler};

use crate::app::api::extract::{json_body, path_id, query_param};
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;
use peptrack_db::model::schedule::Schedule;
use peptrack_service::auth::depot::get_user_from_depot;
use peptrack_service::error::ServiceError;
use peptrack_service::schedule::UpcomingOccurrence;
use peptrack_service::schedule::service::{self, CreateScheduleRequest, resolve_window_days};

/// ## Summary
/// POST /schedule - Creates a dose schedule.
///
/// ## Errors
/// 422 for an empty name, a weekday outside 0-6 or a bad `time_of_day`.
#[handler]
async fn create_schedule(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<Schedule>> {
    let user_id = get_user_from_depot(depot)?.id;
    let body: CreateScheduleRequest = json_body(req).await?;
    let row = body.into_new_schedule(user_id)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let created = service::create(&mut conn, row).await?;

    res.status_code(StatusCode::CREATED);
    Ok(Json(created))
}

#[handler]
async fn list_schedules(depot: &mut Depot) -> AppResult<Json<Vec<Schedule>>> {
    let user_id = get_user_from_depot(depot)?.id;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(service::list(&mut conn, user_id).await?))
}

/// ## Summary
/// GET /schedule/upcoming?days=N - Expands active schedules over
/// `[today, today + N]`.
///
/// ## Errors
/// 422 when `days` is not an integer in 1-60.
#[handler]
async fn upcoming_doses(
    req: &mut Request,
    depot: &mut Depot,
) -> AppResult<Json<Vec<UpcomingOccurrence>>> {
    let user_id = get_user_from_depot(depot)?.id;
    let days = query_param(req, "days")
        .map(|raw| {
            raw.parse::<i64>().map_err(|_e| {
                ServiceError::ValidationError(format!("days must be an integer, got '{raw}'"))
            })
        })
        .transpose()?;
    let days = resolve_window_days(days)?;
    let today = Utc::now().date_naive();

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(service::upcoming(&mut conn, user_id, today, days).await?))
}

#[handler]
async fn pause_schedule(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Schedule>> {
    let user_id = get_user_from_depot(depot)?.id;
    let id = path_id(req)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(service::pause(&mut conn, user_id, id).await?))
}

#[handler]
async fn delete_schedule(req: &mut Request, depot: &mut Depot) -> AppResult<StatusCode> {
    let user_id = get_user_from_depot(depot)?.id;
    let id = path_id(req)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    service::delete(&mut conn, user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("schedule")
        .get(list_schedules)
        .post(create_schedule)
        .push(Router::with_path("upcoming").get(upcoming_doses))
        .push(
            Router::with_path("{id}")
                .delete(delete_schedule)
                .push(Router::with_path("pause").patch(pause_schedule)),
        )
}
