use chrono::Utc;
use salvo::prelude::Json;
use salvo::{Depot, Router, handler};

use crate::client_handler::get_llm_from_depot;
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;
use peptrack_db::model::insight::Insight;
use peptrack_service::auth::depot::get_user_from_depot;
use peptrack_service::insight::{self, InsightReport};

/// ## Summary
/// POST /insights/generate - Summarizes the last week of tracking and
/// returns tips alongside the averages.
#[handler]
async fn generate_insight(depot: &mut Depot) -> AppResult<Json<InsightReport>> {
    let user_id = get_user_from_depot(depot)?.id;
    let llm = get_llm_from_depot(depot);

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(
        insight::generate(&mut conn, llm.as_deref(), user_id, Utc::now()).await?,
    ))
}

#[handler]
async fn list_insights(depot: &mut Depot) -> AppResult<Json<Vec<Insight>>> {
    let user_id = get_user_from_depot(depot)?.id;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(insight::list(&mut conn, user_id).await?))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("insights")
        .get(list_insights)
        .push(Router::with_path("generate").post(generate_insight))
}
