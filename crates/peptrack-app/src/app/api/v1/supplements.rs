use salvo::http::StatusCode;
use salvo::prelude::Json;
use salvo::{Depot, Request, Response, Router, handler};

use crate::app::api::extract::{json_body, path_id};
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;
use peptrack_db::model::supplement::{Supplement, SupplementChanges};
use peptrack_service::auth::depot::get_user_from_depot;
use peptrack_service::validate::require_non_blank;
use peptrack_service::supplement::{self, CreateSupplementRequest};

#[handler]
async fn list_supplements(depot: &mut Depot) -> AppResult<Json<Vec<Supplement>>> {
    let user_id = get_user_from_depot(depot)?.id;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(supplement::list(&mut conn, user_id).await?))
}

#[handler]
async fn create_supplement(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<Supplement>> {
    let user_id = get_user_from_depot(depot)?.id;
    let body: CreateSupplementRequest = json_body(req).await?;
    require_non_blank("name", &body.name)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let created = supplement::create(&mut conn, user_id, body).await?;

    res.status_code(StatusCode::CREATED);
    Ok(Json(created))
}

#[handler]
async fn update_supplement(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Supplement>> {
    let user_id = get_user_from_depot(depot)?.id;
    let id = path_id(req)?;
    let changes: SupplementChanges = json_body(req).await?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(supplement::update(&mut conn, user_id, id, changes).await?))
}

#[handler]
async fn delete_supplement(req: &mut Request, depot: &mut Depot) -> AppResult<StatusCode> {
    let user_id = get_user_from_depot(depot)?.id;
    let id = path_id(req)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    supplement::delete(&mut conn, user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("supplements")
        .get(list_supplements)
        .post(create_supplement)
        .push(
            Router::with_path("{id}")
                .patch(update_supplement)
                .delete(delete_supplement),
        )
}
