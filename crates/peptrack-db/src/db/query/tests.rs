//! Unit tests for the owner-scoped query builders.

use chrono::{NaiveDate, TimeZone, Utc};
use diesel::query_builder::QueryFragment;

use super::*;

fn sql_of<Q>(query: &Q) -> String
where
    Q: QueryFragment<diesel::pg::Pg>,
{
    diesel::debug_query::<diesel::pg::Pg, _>(query).to_string()
}

#[test_log::test]
fn test_every_listing_filters_on_owner() {
    let user_id = uuid::Uuid::new_v4();

    let queries = [
        sql_of(&tracking::for_user(user_id)),
        sql_of(&peptide::for_user(user_id)),
        sql_of(&supplement::for_user(user_id)),
        sql_of(&schedule::for_user(user_id)),
        sql_of(&cycle::for_user(user_id)),
        sql_of(&lab::for_user(user_id)),
        sql_of(&insight::for_user(user_id)),
    ];

    for sql in queries {
        assert!(sql.contains("\"user_id\" = $1"), "unscoped query: {sql}");
    }
}

#[test_log::test]
fn test_by_id_filters_on_owner_and_id() {
    let sql = sql_of(&peptide::by_id(uuid::Uuid::new_v4(), uuid::Uuid::new_v4()));
    assert!(sql.contains("\"peptides\".\"user_id\" = $1"));
    assert!(sql.contains("\"peptides\".\"id\" = $2"));
}

#[test_log::test]
fn test_tracking_range_is_inclusive_and_ascending() {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap();
    let sql = sql_of(&tracking::in_range(uuid::Uuid::new_v4(), start, end));

    assert!(sql.contains("\"created_at\" >= $2"));
    assert!(sql.contains("\"created_at\" <= $3"));
    assert!(sql.contains("ORDER BY \"daily_tracking\".\"created_at\" ASC"));
}

#[test_log::test]
fn test_tracking_since_has_no_upper_bound() {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let sql = sql_of(&tracking::since(uuid::Uuid::new_v4(), start));

    assert!(sql.contains("\"created_at\" >= $2"));
    assert!(!sql.contains("\"created_at\" <="));
    assert!(sql.contains("ORDER BY \"daily_tracking\".\"created_at\" ASC"));
}

#[test_log::test]
fn test_active_schedules_are_bounded_by_window_end() {
    let window_end = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
    let sql = sql_of(&schedule::active_until(uuid::Uuid::new_v4(), window_end));

    assert!(sql.contains("\"schedules\".\"status\" = $2"));
    assert!(sql.contains("\"schedules\".\"start_date\" <= $3"));
    assert!(sql.contains("-- binds: ["));
    assert!(sql.contains("Active"));
}

#[test_log::test]
fn test_listing_orders() {
    let user_id = uuid::Uuid::new_v4();
    assert!(sql_of(&peptide::for_user(user_id)).contains("ORDER BY \"peptides\".\"name\" ASC"));
    assert!(sql_of(&cycle::for_user(user_id)).contains("ORDER BY \"cycles\".\"created_at\" DESC"));
    assert!(sql_of(&lab::for_user(user_id)).contains("ORDER BY \"labs\".\"created_at\" DESC"));
}
