//! Supplement list.

use peptrack_db::db::connection::DbConnection;
use peptrack_db::db::query::supplement as supplement_query;
use peptrack_db::model::supplement::{NewSupplement, Supplement, SupplementChanges};
use serde::Deserialize;

use crate::error::{ServiceError, ServiceResult};
use crate::validate::require_non_blank;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSupplementRequest {
    pub name: String,
    #[serde(default)]
    pub dose: Option<String>,
    #[serde(default)]
    pub schedule: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
) -> ServiceResult<Vec<Supplement>> {
    Ok(supplement_query::list(conn, user_id).await?)
}

/// ## Errors
/// Returns `ValidationError` for a blank name or a database error.
#[tracing::instrument(skip(conn, request), fields(user_id = %user_id))]
pub async fn create(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
    request: CreateSupplementRequest,
) -> ServiceResult<Supplement> {
    require_non_blank("name", &request.name)?;
    let row = NewSupplement {
        user_id,
        name: request.name,
        dose: request.dose,
        schedule: request.schedule,
        notes: request.notes,
    };
    Ok(supplement_query::create(conn, &row).await?)
}

/// ## Errors
/// Returns `NotFound` when the user owns no such supplement.
#[tracing::instrument(skip(conn, changes), fields(user_id = %user_id))]
pub async fn update(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
    id: uuid::Uuid,
    changes: SupplementChanges,
) -> ServiceResult<Supplement> {
    if let Some(name) = changes.name.as_deref() {
        require_non_blank("name", name)?;
    }
    let updated = if changes.is_empty() {
        supplement_query::get(conn, user_id, id).await?
    } else {
        supplement_query::update(conn, user_id, id, &changes).await?
    };
    updated.ok_or(ServiceError::NotFound("Supplement"))
}

/// ## Errors
/// Returns `NotFound` when the user owns no such supplement.
#[tracing::instrument(skip(conn), fields(user_id = %user_id))]
pub async fn delete(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
    id: uuid::Uuid,
) -> ServiceResult<()> {
    match supplement_query::delete(conn, user_id, id).await? {
        0 => Err(ServiceError::NotFound("Supplement")),
        _ => Ok(()),
    }
}
