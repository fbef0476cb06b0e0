use salvo::http::StatusCode;
use salvo::prelude::Json;
use salvo::{Depot, Request, Response, Router, handler};

use crate::app::api::extract::{json_body, path_id};
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;
use peptrack_db::model::peptide::{Peptide, PeptideChanges};
use peptrack_service::auth::depot::get_user_from_depot;
use peptrack_service::peptide::{self, CreatePeptideRequest};
use peptrack_service::validate::require_non_blank;

#[handler]
async fn list_peptides(depot: &mut Depot) -> AppResult<Json<Vec<Peptide>>> {
    let user_id = get_user_from_depot(depot)?.id;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(peptide::list(&mut conn, user_id).await?))
}

#[handler]
async fn create_peptide(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<Peptide>> {
    let user_id = get_user_from_depot(depot)?.id;
    let body: CreatePeptideRequest = json_body(req).await?;
    require_non_blank("name", &body.name)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let created = peptide::create(&mut conn, user_id, body).await?;

    res.status_code(StatusCode::CREATED);
    Ok(Json(created))
}

#[handler]
async fn update_peptide(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Peptide>> {
    let user_id = get_user_from_depot(depot)?.id;
    let id = path_id(req)?;
    let changes: PeptideChanges = json_body(req).await?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(peptide::update(&mut conn, user_id, id, changes).await?))
}

#[handler]
async fn delete_peptide(req: &mut Request, depot: &mut Depot) -> AppResult<StatusCode> {
    let user_id = get_user_from_depot(depot)?.id;
    let id = path_id(req)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    peptide::delete(&mut conn, user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("peptides")
        .get(list_peptides)
        .post(create_peptide)
        .push(
            Router::with_path("{id}")
                .patch(update_peptide)
                .delete(delete_peptide),
        )
}
