//! Lab panel queries.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::labs;
use crate::model::lab::{Lab, NewLab};

/// ## Summary
/// Returns a query for the user's lab panels, newest first.
#[must_use]
pub fn for_user(user_id: uuid::Uuid) -> labs::BoxedQuery<'static, diesel::pg::Pg> {
    labs::table
        .filter(labs::user_id.eq(user_id))
        .order(labs::created_at.desc())
        .into_boxed()
}

#[must_use]
pub fn by_id(user_id: uuid::Uuid, id: uuid::Uuid) -> labs::BoxedQuery<'static, diesel::pg::Pg> {
    labs::table
        .filter(labs::user_id.eq(user_id))
        .filter(labs::id.eq(id))
        .into_boxed()
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
) -> diesel::QueryResult<Vec<Lab>> {
    for_user(user_id).select(Lab::as_select()).load(conn).await
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn get(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
    id: uuid::Uuid,
) -> diesel::QueryResult<Option<Lab>> {
    by_id(user_id, id)
        .select(Lab::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Errors
/// Returns a database error if the insert fails.
pub async fn create(conn: &mut DbConnection<'_>, row: &NewLab) -> diesel::QueryResult<Lab> {
    diesel::insert_into(labs::table)
        .values(row)
        .returning(Lab::as_returning())
        .get_result(conn)
        .await
}
