use salvo::http::StatusCode;
use salvo::prelude::Json;
use salvo::{Depot, Request, Response, Router, handler};

use crate::app::api::extract::{json_body, path_id};
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;
use peptrack_db::model::cycle::{Cycle, CycleChanges};
use peptrack_service::auth::depot::get_user_from_depot;
use peptrack_service::cycle::{self, CreateCycleRequest};

#[handler]
async fn list_cycles(depot: &mut Depot) -> AppResult<Json<Vec<Cycle>>> {
    let user_id = get_user_from_depot(depot)?.id;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(cycle::list(&mut conn, user_id).await?))
}

/// POST /cycles - `status` defaults to `planned`.
#[handler]
async fn create_cycle(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<Cycle>> {
    let user_id = get_user_from_depot(depot)?.id;
    let body: CreateCycleRequest = json_body(req).await?;
    let row = body.into_new_cycle(user_id)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let created = cycle::create(&mut conn, row).await?;

    res.status_code(StatusCode::CREATED);
    Ok(Json(created))
}

#[handler]
async fn update_cycle(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Cycle>> {
    let user_id = get_user_from_depot(depot)?.id;
    let id = path_id(req)?;
    let changes: CycleChanges = json_body(req).await?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(cycle::update(&mut conn, user_id, id, changes).await?))
}

#[handler]
async fn delete_cycle(req: &mut Request, depot: &mut Depot) -> AppResult<StatusCode> {
    let user_id = get_user_from_depot(depot)?.id;
    let id = path_id(req)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    cycle::delete(&mut conn, user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("cycles")
        .get(list_cycles)
        .post(create_cycle)
        .push(
            Router::with_path("{id}")
                .patch(update_cycle)
                .delete(delete_cycle),
        )
}
