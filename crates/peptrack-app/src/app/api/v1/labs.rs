use salvo::http::StatusCode;
use salvo::prelude::Json;
use salvo::{Depot, Request, Response, Router, handler};

use crate::app::api::extract::{json_body, path_id};
use crate::client_handler::get_llm_from_depot;
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;
use peptrack_db::model::lab::Lab;
use peptrack_service::auth::depot::get_user_from_depot;
use peptrack_service::lab::{self, CreateLabRequest, LabSummary};
use peptrack_service::validate::require_non_blank;

#[handler]
async fn create_lab(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<Lab>> {
    let user_id = get_user_from_depot(depot)?.id;
    let body: CreateLabRequest = json_body(req).await?;
    require_non_blank("panel_name", &body.panel_name)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let created = lab::create(&mut conn, user_id, body).await?;

    res.status_code(StatusCode::CREATED);
    Ok(Json(created))
}

#[handler]
async fn list_labs(depot: &mut Depot) -> AppResult<Json<Vec<Lab>>> {
    let user_id = get_user_from_depot(depot)?.id;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(lab::list(&mut conn, user_id).await?))
}

/// ## Summary
/// POST /labs/{id}/summarize - Plain-text summary of one panel, from the LLM
/// when configured and rule-based otherwise.
///
/// ## Errors
/// 404 when the user owns no such lab.
#[handler]
async fn summarize_lab(req: &mut Request, depot: &mut Depot) -> AppResult<Json<LabSummary>> {
    let user_id = get_user_from_depot(depot)?.id;
    let id = path_id(req)?;
    let llm = get_llm_from_depot(depot);

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(
        lab::summarize(&mut conn, llm.as_deref(), user_id, id).await?,
    ))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("labs")
        .get(list_labs)
        .post(create_lab)
        .push(Router::with_path("{id}/summarize").post(summarize_lab))
}
