//! Schedule persistence and the upcoming-dose listing.

use chrono::{NaiveDate, TimeDelta};
use peptrack_core::constants::{UPCOMING_DAYS_DEFAULT, UPCOMING_DAYS_MAX, UPCOMING_DAYS_MIN};
use peptrack_core::util::date::validate_time_of_day;
use peptrack_db::db::connection::DbConnection;
use peptrack_db::db::enums::{ItemType, ScheduleStatus};
use peptrack_db::db::query::schedule as schedule_query;
use peptrack_db::model::schedule::{NewSchedule, Schedule};
use serde::Deserialize;

use crate::error::{ServiceError, ServiceResult};
use crate::validate::require_non_blank;

use super::expand::{ScheduleDefinition, UpcomingOccurrence, expand, weekday_from_number};

/// Client payload for `POST /schedule`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScheduleRequest {
    pub name: String,
    #[serde(default)]
    pub item_type: Option<ItemType>,
    #[serde(default)]
    pub item_id: Option<uuid::Uuid>,
    #[serde(default)]
    pub dose: Option<String>,
    pub frequency: String,
    #[serde(default)]
    pub weekday: Option<i64>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub time_of_day: Option<String>,
    #[serde(default)]
    pub status: Option<ScheduleStatus>,
}

impl CreateScheduleRequest {
    /// ## Summary
    /// Validates the payload and binds it to `user_id`.
    ///
    /// ## Errors
    /// Returns `ValidationError` for an empty name, a weekday outside `0..=6`
    /// or a time of day that is not `HH:MM`.
    pub fn into_new_schedule(self, user_id: uuid::Uuid) -> ServiceResult<NewSchedule> {
        require_non_blank("name", &self.name)?;
        require_non_blank("frequency", &self.frequency)?;
        let weekday = match self.weekday {
            Some(value) => {
                let wd = weekday_from_number(value)?;
                Some(i16::try_from(wd).map_err(|_e| {
                    ServiceError::ValidationError(format!("weekday must be 0-6, got {value}"))
                })?)
            }
            None => None,
        };
        if let Some(time) = self.time_of_day.as_deref() {
            validate_time_of_day(time)?;
        }

        Ok(NewSchedule {
            user_id,
            name: self.name,
            item_type: self.item_type,
            item_id: self.item_id,
            dose: self.dose,
            frequency: self.frequency,
            weekday,
            start_date: self.start_date,
            end_date: self.end_date,
            time_of_day: self.time_of_day,
            status: self.status.unwrap_or_default(),
        })
    }
}

/// ## Summary
/// Resolves the `days` query parameter for the upcoming listing.
///
/// ## Errors
/// Returns `ValidationError` when the value is outside the allowed window.
pub fn resolve_window_days(days: Option<i64>) -> ServiceResult<i64> {
    let days = days.unwrap_or(UPCOMING_DAYS_DEFAULT);
    if (UPCOMING_DAYS_MIN..=UPCOMING_DAYS_MAX).contains(&days) {
        Ok(days)
    } else {
        Err(ServiceError::ValidationError(format!(
            "days must be between {UPCOMING_DAYS_MIN} and {UPCOMING_DAYS_MAX}, got {days}"
        )))
    }
}

/// ## Summary
/// Stores a schedule validated by [`CreateScheduleRequest::into_new_schedule`].
///
/// ## Errors
/// Returns a database error if the insert fails.
#[tracing::instrument(skip(conn, row), fields(user_id = %row.user_id))]
pub async fn create(conn: &mut DbConnection<'_>, row: NewSchedule) -> ServiceResult<Schedule> {
    let schedule = schedule_query::create(conn, &row).await?;
    tracing::info!(schedule_id = %schedule.id, "Schedule created");
    Ok(schedule)
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
) -> ServiceResult<Vec<Schedule>> {
    Ok(schedule_query::list(conn, user_id).await?)
}

/// ## Summary
/// Lists the user's dose occurrences from `today` through `today + days`.
///
/// ## Errors
/// Returns a database error if loading the schedules fails.
#[tracing::instrument(skip(conn), fields(user_id = %user_id))]
pub async fn upcoming(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
    today: NaiveDate,
    days: i64,
) -> ServiceResult<Vec<UpcomingOccurrence>> {
    let window_end = today + TimeDelta::days(days);
    let rows = schedule_query::list_active_until(conn, user_id, window_end).await?;
    let definitions: Vec<ScheduleDefinition> = rows.iter().map(ScheduleDefinition::from).collect();

    let occurrences = expand(&definitions, today, days);
    tracing::debug!(
        schedules = definitions.len(),
        occurrences = occurrences.len(),
        "Expanded upcoming doses"
    );
    Ok(occurrences)
}

/// ## Errors
/// Returns `NotFound` when the user owns no such schedule.
#[tracing::instrument(skip(conn), fields(user_id = %user_id))]
pub async fn pause(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
    id: uuid::Uuid,
) -> ServiceResult<Schedule> {
    schedule_query::set_status(conn, user_id, id, ScheduleStatus::Paused)
        .await?
        .ok_or(ServiceError::NotFound("Schedule"))
}

/// ## Errors
/// Returns `NotFound` when the user owns no such schedule.
#[tracing::instrument(skip(conn), fields(user_id = %user_id))]
pub async fn delete(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
    id: uuid::Uuid,
) -> ServiceResult<()> {
    match schedule_query::delete(conn, user_id, id).await? {
        0 => Err(ServiceError::NotFound("Schedule")),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: serde_json::Value) -> CreateScheduleRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_window_days_defaults_and_bounds() {
        assert_eq!(resolve_window_days(None).unwrap(), 7);
        assert_eq!(resolve_window_days(Some(1)).unwrap(), 1);
        assert_eq!(resolve_window_days(Some(60)).unwrap(), 60);
        assert!(matches!(
            resolve_window_days(Some(0)),
            Err(ServiceError::ValidationError(_))
        ));
        assert!(matches!(
            resolve_window_days(Some(61)),
            Err(ServiceError::ValidationError(_))
        ));
    }

    #[test]
    fn test_status_defaults_to_active() {
        let user_id = uuid::Uuid::new_v4();
        let row = request(serde_json::json!({
            "name": "BPC-157",
            "frequency": "daily",
            "start_date": "2024-01-01",
        }))
        .into_new_schedule(user_id)
        .unwrap();

        assert_eq!(row.status, ScheduleStatus::Active);
        assert_eq!(row.user_id, user_id);
        assert_eq!(row.weekday, None);
    }

    #[test]
    fn test_rejects_empty_name_and_bad_weekday() {
        let empty = request(serde_json::json!({
            "name": " ",
            "frequency": "daily",
            "start_date": "2024-01-01",
        }));
        assert!(matches!(
            empty.into_new_schedule(uuid::Uuid::new_v4()),
            Err(ServiceError::ValidationError(_))
        ));

        let weekday = request(serde_json::json!({
            "name": "TB-500",
            "frequency": "weekly",
            "weekday": 9,
            "start_date": "2024-01-01",
        }));
        assert!(weekday.into_new_schedule(uuid::Uuid::new_v4()).is_err());
    }

    #[test]
    fn test_rejects_malformed_time_of_day() {
        let bad = request(serde_json::json!({
            "name": "Evening",
            "frequency": "daily",
            "start_date": "2024-01-01",
            "time_of_day": "25:00",
        }));
        assert!(bad.into_new_schedule(uuid::Uuid::new_v4()).is_err());
    }

    #[test]
    fn test_rejects_unknown_item_type() {
        let parsed = serde_json::from_value::<CreateScheduleRequest>(serde_json::json!({
            "name": "x",
            "frequency": "daily",
            "start_date": "2024-01-01",
            "item_type": "hormone",
        }));
        assert!(parsed.is_err());
    }
}
