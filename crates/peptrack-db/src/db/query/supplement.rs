//! Supplement queries.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::supplements;
use crate::model::supplement::{NewSupplement, Supplement, SupplementChanges};

/// ## Summary
/// Returns a query for the user's supplements ordered by name.
#[must_use]
pub fn for_user(user_id: uuid::Uuid) -> supplements::BoxedQuery<'static, diesel::pg::Pg> {
    supplements::table
        .filter(supplements::user_id.eq(user_id))
        .order(supplements::name.asc())
        .into_boxed()
}

#[must_use]
pub fn by_id(
    user_id: uuid::Uuid,
    id: uuid::Uuid,
) -> supplements::BoxedQuery<'static, diesel::pg::Pg> {
    supplements::table
        .filter(supplements::user_id.eq(user_id))
        .filter(supplements::id.eq(id))
        .into_boxed()
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
) -> diesel::QueryResult<Vec<Supplement>> {
    for_user(user_id)
        .select(Supplement::as_select())
        .load(conn)
        .await
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn get(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
    id: uuid::Uuid,
) -> diesel::QueryResult<Option<Supplement>> {
    by_id(user_id, id)
        .select(Supplement::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Errors
/// Returns a database error if the insert fails.
pub async fn create(
    conn: &mut DbConnection<'_>,
    row: &NewSupplement,
) -> diesel::QueryResult<Supplement> {
    diesel::insert_into(supplements::table)
        .values(row)
        .returning(Supplement::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Applies non-empty `changes`; `None` when the row does not exist.
///
/// ## Errors
/// Returns a database error if the update fails.
pub async fn update(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
    id: uuid::Uuid,
    changes: &SupplementChanges,
) -> diesel::QueryResult<Option<Supplement>> {
    diesel::update(
        supplements::table
            .filter(supplements::user_id.eq(user_id))
            .filter(supplements::id.eq(id)),
    )
    .set(changes)
    .returning(Supplement::as_returning())
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
        supplements::table
            .filter(supplements::user_id.eq(user_id))
            .filter(supplements::id.eq(id)),
    )
    .execute(conn)
    .await
}
