//! Protocol cycles.

use peptrack_db::db::connection::DbConnection;
use peptrack_db::db::enums::CycleStatus;
use peptrack_db::db::query::cycle as cycle_query;
use peptrack_db::model::cycle::{Cycle, CycleChanges, NewCycle};
use serde::Deserialize;

use crate::error::{ServiceError, ServiceResult};
use crate::validate::require_non_blank;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCycleRequest {
    pub name: String,
    #[serde(default)]
    pub status: Option<CycleStatus>,
    #[serde(default)]
    pub start_date: Option<chrono::NaiveDate>,
    #[serde(default)]
    pub end_date: Option<chrono::NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateCycleRequest {
    /// ## Errors
    /// Returns `ValidationError` for a blank name.
    pub fn into_new_cycle(self, user_id: uuid::Uuid) -> ServiceResult<NewCycle> {
        require_non_blank("name", &self.name)?;
        Ok(NewCycle {
            user_id,
            name: self.name,
            status: self.status.unwrap_or_default(),
            start_date: self.start_date,
            end_date: self.end_date,
            notes: self.notes,
        })
    }
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list(conn: &mut DbConnection<'_>, user_id: uuid::Uuid) -> ServiceResult<Vec<Cycle>> {
    Ok(cycle_query::list(conn, user_id).await?)
}

/// ## Errors
/// Returns a database error if the insert fails.
#[tracing::instrument(skip(conn, row), fields(user_id = %row.user_id))]
pub async fn create(conn: &mut DbConnection<'_>, row: NewCycle) -> ServiceResult<Cycle> {
    Ok(cycle_query::create(conn, &row).await?)
}

/// ## Errors
/// Returns `NotFound` when the user owns no such cycle.
#[tracing::instrument(skip(conn, changes), fields(user_id = %user_id))]
pub async fn update(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
    id: uuid::Uuid,
    changes: CycleChanges,
) -> ServiceResult<Cycle> {
    if let Some(name) = changes.name.as_deref() {
        require_non_blank("name", name)?;
    }
    let updated = if changes.is_empty() {
        cycle_query::get(conn, user_id, id).await?
    } else {
        cycle_query::update(conn, user_id, id, &changes).await?
    };
    updated.ok_or(ServiceError::NotFound("Cycle"))
}

/// ## Errors
/// Returns `NotFound` when the user owns no such cycle.
#[tracing::instrument(skip(conn), fields(user_id = %user_id))]
pub async fn delete(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
    id: uuid::Uuid,
) -> ServiceResult<()> {
    match cycle_query::delete(conn, user_id, id).await? {
        0 => Err(ServiceError::NotFound("Cycle")),
        _ => Ok(()),
    }
}
