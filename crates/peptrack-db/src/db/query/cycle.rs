//! Protocol cycle queries.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::cycles;
use crate::model::cycle::{Cycle, CycleChanges, NewCycle};

/// ## Summary
/// Returns a query for the user's cycles, newest first.
#[must_use]
pub fn for_user(user_id: uuid::Uuid) -> cycles::BoxedQuery<'static, diesel::pg::Pg> {
    cycles::table
        .filter(cycles::user_id.eq(user_id))
        .order(cycles::created_at.desc())
        .into_boxed()
}

#[must_use]
pub fn by_id(user_id: uuid::Uuid, id: uuid::Uuid) -> cycles::BoxedQuery<'static, diesel::pg::Pg> {
    cycles::table
        .filter(cycles::user_id.eq(user_id))
        .filter(cycles::id.eq(id))
        .into_boxed()
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
) -> diesel::QueryResult<Vec<Cycle>> {
    for_user(user_id).select(Cycle::as_select()).load(conn).await
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn get(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
    id: uuid::Uuid,
) -> diesel::QueryResult<Option<Cycle>> {
    by_id(user_id, id)
        .select(Cycle::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Errors
/// Returns a database error if the insert fails.
pub async fn create(conn: &mut DbConnection<'_>, row: &NewCycle) -> diesel::QueryResult<Cycle> {
    diesel::insert_into(cycles::table)
        .values(row)
        .returning(Cycle::as_returning())
        .get_result(conn)
        .await
}

/// ## Errors
/// Returns a database error if the update fails.
pub async fn update(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
    id: uuid::Uuid,
    changes: &CycleChanges,
) -> diesel::QueryResult<Option<Cycle>> {
    diesel::update(
        cycles::table
            .filter(cycles::user_id.eq(user_id))
            .filter(cycles::id.eq(id)),
    )
    .set(changes)
    .returning(Cycle::as_returning())
    .get_result(conn)
    .await
    .optional()
}

/// ## Errors
/// Returns a database error if the delete fails.
pub async fn delete(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
    id: uuid::Uuid,
) -> diesel::QueryResult<usize> {
    diesel::delete(
        cycles::table
            .filter(cycles::user_id.eq(user_id))
            .filter(cycles::id.eq(id)),
    )
    .execute(conn)
    .await
}
