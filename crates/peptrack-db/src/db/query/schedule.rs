//! Dose schedule queries.

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::enums::ScheduleStatus;
use crate::db::schema::schedules;
use crate::model::schedule::{NewSchedule, Schedule};

/// ## Summary
/// Returns a query for the user's schedules ordered by start date.
#[must_use]
pub fn for_user(user_id: uuid::Uuid) -> schedules::BoxedQuery<'static, diesel::pg::Pg> {
    schedules::table
        .filter(schedules::user_id.eq(user_id))
        .order(schedules::start_date.asc())
        .into_boxed()
}

/// ## Summary
/// Returns a query for the user's active schedules that start on or before
/// `window_end`.
#[must_use]
pub fn active_until(
    user_id: uuid::Uuid,
    window_end: NaiveDate,
) -> schedules::BoxedQuery<'static, diesel::pg::Pg> {
    for_user(user_id)
        .filter(schedules::status.eq(ScheduleStatus::Active))
        .filter(schedules::start_date.le(window_end))
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
) -> diesel::QueryResult<Vec<Schedule>> {
    for_user(user_id).select(Schedule::as_select()).load(conn).await
}

/// ## Summary
/// Loads the schedules that can produce occurrences up to `window_end`.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_active_until(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
    window_end: NaiveDate,
) -> diesel::QueryResult<Vec<Schedule>> {
    active_until(user_id, window_end)
        .select(Schedule::as_select())
        .load(conn)
        .await
}

/// ## Errors
/// Returns a database error if the insert fails.
pub async fn create(
    conn: &mut DbConnection<'_>,
    row: &NewSchedule,
) -> diesel::QueryResult<Schedule> {
    diesel::insert_into(schedules::table)
        .values(row)
        .returning(Schedule::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Sets the schedule's status, returning the updated row or `None` when the
/// user owns no such schedule.
///
/// ## Errors
/// Returns a database error if the update fails.
pub async fn set_status(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
    id: uuid::Uuid,
    status: ScheduleStatus,
) -> diesel::QueryResult<Option<Schedule>> {
    diesel::update(
        schedules::table
            .filter(schedules::user_id.eq(user_id))
            .filter(schedules::id.eq(id)),
    )
    .set(schedules::status.eq(status))
    .returning(Schedule::as_returning())
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
        schedules::table
            .filter(schedules::user_id.eq(user_id))
            .filter(schedules::id.eq(id)),
    )
    .execute(conn)
    .await
}
