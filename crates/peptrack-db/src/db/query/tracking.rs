//! Daily tracking queries.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::daily_tracking;
use crate::model::tracking::{DailyTracking, NewDailyTracking};

/// ## Summary
/// Returns a query for every tracking row owned by `user_id`.
#[must_use]
pub fn for_user(user_id: uuid::Uuid) -> daily_tracking::BoxedQuery<'static, diesel::pg::Pg> {
    daily_tracking::table
        .filter(daily_tracking::user_id.eq(user_id))
        .into_boxed()
}

/// ## Summary
/// Returns a query for the user's rows with `created_at >= start`, oldest
/// first. Rows dated in the future are included.
#[must_use]
pub fn since(
    user_id: uuid::Uuid,
    start: DateTime<Utc>,
) -> daily_tracking::BoxedQuery<'static, diesel::pg::Pg> {
    for_user(user_id)
        .filter(daily_tracking::created_at.ge(start))
        .order(daily_tracking::created_at.asc())
}

/// ## Summary
/// Returns a query for the user's rows with `created_at` in `[start, end]`,
/// oldest first.
#[must_use]
pub fn in_range(
    user_id: uuid::Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> daily_tracking::BoxedQuery<'static, diesel::pg::Pg> {
    since(user_id, start).filter(daily_tracking::created_at.le(end))
}

/// ## Summary
/// Inserts a tracking row and returns it as stored.
///
/// ## Errors
/// Returns a database error if the insert fails.
pub async fn create(
    conn: &mut DbConnection<'_>,
    row: &NewDailyTracking,
) -> diesel::QueryResult<DailyTracking> {
    diesel::insert_into(daily_tracking::table)
        .values(row)
        .returning(DailyTracking::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Loads the user's rows within `[start, end]`, oldest first.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_range(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> diesel::QueryResult<Vec<DailyTracking>> {
    in_range(user_id, start, end)
        .select(DailyTracking::as_select())
        .load(conn)
        .await
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_since(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
    start: DateTime<Utc>,
) -> diesel::QueryResult<Vec<DailyTracking>> {
    since(user_id, start)
        .select(DailyTracking::as_select())
        .load(conn)
        .await
}

/// ## Summary
/// Loads the user's most recent row, if any.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn latest(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
) -> diesel::QueryResult<Option<DailyTracking>> {
    for_user(user_id)
        .order(daily_tracking::created_at.desc())
        .select(DailyTracking::as_select())
        .first(conn)
        .await
        .optional()
}
