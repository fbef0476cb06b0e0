//! Peptide inventory.

use peptrack_db::db::connection::DbConnection;
use peptrack_db::db::query::peptide as peptide_query;
use peptrack_db::model::peptide::{NewPeptide, Peptide, PeptideChanges};
use serde::Deserialize;

use crate::error::{ServiceError, ServiceResult};
use crate::validate::require_non_blank;

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePeptideRequest {
    pub name: String,
    #[serde(default)]
    pub units_remaining: Option<f64>,
    #[serde(default)]
    pub expires_on: Option<chrono::NaiveDate>,
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list(conn: &mut DbConnection<'_>, user_id: uuid::Uuid) -> ServiceResult<Vec<Peptide>> {
    Ok(peptide_query::list(conn, user_id).await?)
}

/// ## Errors
/// Returns `ValidationError` for a blank name or a database error.
#[tracing::instrument(skip(conn, request), fields(user_id = %user_id))]
pub async fn create(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
    request: CreatePeptideRequest,
) -> ServiceResult<Peptide> {
    require_non_blank("name", &request.name)?;
    let row = NewPeptide {
        user_id,
        name: request.name,
        units_remaining: request.units_remaining,
        expires_on: request.expires_on,
    };
    Ok(peptide_query::create(conn, &row).await?)
}

/// ## Summary
/// Applies the provided fields; an empty patch returns the current row.
///
/// ## Errors
/// Returns `NotFound` when the user owns no such peptide.
#[tracing::instrument(skip(conn, changes), fields(user_id = %user_id))]
pub async fn update(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
    id: uuid::Uuid,
    changes: PeptideChanges,
) -> ServiceResult<Peptide> {
    if let Some(name) = changes.name.as_deref() {
        require_non_blank("name", name)?;
    }
    let updated = if changes.is_empty() {
        peptide_query::get(conn, user_id, id).await?
    } else {
        peptide_query::update(conn, user_id, id, &changes).await?
    };
    updated.ok_or(ServiceError::NotFound("Peptide"))
}

/// ## Errors
/// Returns `NotFound` when the user owns no such peptide.
#[tracing::instrument(skip(conn), fields(user_id = %user_id))]
pub async fn delete(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
    id: uuid::Uuid,
) -> ServiceResult<()> {
    match peptide_query::delete(conn, user_id, id).await? {
        0 => Err(ServiceError::NotFound("Peptide")),
        _ => Ok(()),
    }
}
