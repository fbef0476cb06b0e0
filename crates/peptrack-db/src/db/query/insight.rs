//! Stored insight queries.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::insights;
use crate::model::insight::{Insight, NewInsight};

/// ## Summary
/// Returns a query for the user's insights, newest first.
#[must_use]
pub fn for_user(user_id: uuid::Uuid) -> insights::BoxedQuery<'static, diesel::pg::Pg> {
    insights::table
        .filter(insights::user_id.eq(user_id))
        .order(insights::created_at.desc())
        .into_boxed()
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
) -> diesel::QueryResult<Vec<Insight>> {
    for_user(user_id).select(Insight::as_select()).load(conn).await
}

/// ## Errors
/// Returns a database error if the insert fails.
pub async fn create(conn: &mut DbConnection<'_>, row: &NewInsight) -> diesel::QueryResult<Insight> {
    diesel::insert_into(insights::table)
        .values(row)
        .returning(Insight::as_returning())
        .get_result(conn)
        .await
}
