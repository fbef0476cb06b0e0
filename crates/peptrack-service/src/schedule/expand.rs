//! Expansion of recurring dose schedules into dated occurrences.
//!
//! Expansion is pure: definitions come in already validated, and the caller
//! supplies the evaluation date, so results depend on nothing but the inputs.

use chrono::{Datelike, NaiveDate, TimeDelta};
use peptrack_core::error::{CoreError, CoreResult};
use peptrack_core::types::Frequency;
use peptrack_core::util::date::{parse_iso_date, validate_time_of_day};
use peptrack_db::db::enums::{ItemType, ScheduleStatus};
use peptrack_db::model::schedule::Schedule;
use serde::Serialize;

/// Sort key standing in for a missing time of day; orders after any `HH:MM`.
const MISSING_TIME_SORT_KEY: &str = "99:99";

/// A schedule in the shape the expander works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleDefinition {
    pub id: uuid::Uuid,
    pub name: String,
    pub item_type: Option<ItemType>,
    pub dose: Option<String>,
    pub frequency: Frequency,
    /// Day of week, Monday = 0.
    pub weekday: Option<u32>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub time_of_day: Option<String>,
    pub status: ScheduleStatus,
}

/// Unvalidated schedule fields as they arrive from a client or a text source.
#[derive(Debug, Clone, Default)]
pub struct RawSchedule<'a> {
    pub id: uuid::Uuid,
    pub name: &'a str,
    pub item_type: Option<ItemType>,
    pub dose: Option<&'a str>,
    pub frequency: &'a str,
    pub weekday: Option<i64>,
    pub start_date: &'a str,
    pub end_date: Option<&'a str>,
    pub time_of_day: Option<&'a str>,
    pub status: ScheduleStatus,
}

impl TryFrom<RawSchedule<'_>> for ScheduleDefinition {
    type Error = CoreError;

    fn try_from(raw: RawSchedule<'_>) -> CoreResult<Self> {
        let weekday = raw.weekday.map(weekday_from_number).transpose()?;
        if let Some(time) = raw.time_of_day {
            validate_time_of_day(time)?;
        }
        let end_date = raw
            .end_date
            .map(|end| parse_iso_date("end_date", end))
            .transpose()?;

        Ok(Self {
            id: raw.id,
            name: raw.name.to_string(),
            item_type: raw.item_type,
            dose: raw.dose.map(str::to_string),
            frequency: Frequency::parse(raw.frequency),
            weekday,
            start_date: parse_iso_date("start_date", raw.start_date)?,
            end_date,
            time_of_day: raw.time_of_day.map(str::to_string),
            status: raw.status,
        })
    }
}

impl From<&Schedule> for ScheduleDefinition {
    fn from(row: &Schedule) -> Self {
        Self {
            id: row.id,
            name: row.name.clone(),
            item_type: row.item_type,
            dose: row.dose.clone(),
            frequency: Frequency::parse(&row.frequency),
            // The column is CHECK-constrained to 0..=6.
            weekday: row.weekday.and_then(|wd| u32::try_from(wd).ok()),
            start_date: row.start_date,
            end_date: row.end_date,
            time_of_day: row.time_of_day.clone(),
            status: row.status,
        }
    }
}

/// ## Summary
/// Converts a client supplied weekday number to the Monday = 0 convention.
///
/// ## Errors
/// Returns `ValidationError` if the value is outside `0..=6`.
pub fn weekday_from_number(value: i64) -> CoreResult<u32> {
    u32::try_from(value)
        .ok()
        .filter(|wd| *wd <= 6)
        .ok_or_else(|| CoreError::ValidationError {
            field: "weekday",
            value: value.to_string(),
            expected: "must be 0-6",
        })
}

/// One concrete dose on a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingOccurrence {
    pub schedule_id: uuid::Uuid,
    pub name: String,
    pub item_type: Option<ItemType>,
    pub dose: Option<String>,
    pub date: NaiveDate,
    pub time_of_day: Option<String>,
}

impl UpcomingOccurrence {
    fn new(schedule: &ScheduleDefinition, date: NaiveDate) -> Self {
        Self {
            schedule_id: schedule.id,
            name: schedule.name.clone(),
            item_type: schedule.item_type,
            dose: schedule.dose.clone(),
            date,
            time_of_day: schedule.time_of_day.clone(),
        }
    }

    fn sort_key(&self) -> (NaiveDate, &str) {
        (
            self.date,
            self.time_of_day.as_deref().unwrap_or(MISSING_TIME_SORT_KEY),
        )
    }
}

/// ## Summary
/// Expands active schedules into occurrences within
/// `today..=today + window_days`, ordered by date and then time of day.
///
/// Schedules that are not active, that end before the window, or whose
/// frequency is not understood contribute nothing. Occurrences are not
/// deduplicated, and equal keys keep their input order.
#[must_use]
pub fn expand(
    schedules: &[ScheduleDefinition],
    today: NaiveDate,
    window_days: i64,
) -> Vec<UpcomingOccurrence> {
    let window_end = today + TimeDelta::days(window_days);

    let mut occurrences: Vec<UpcomingOccurrence> = schedules
        .iter()
        .filter(|schedule| schedule.status == ScheduleStatus::Active)
        .filter(|schedule| schedule.start_date <= window_end)
        .flat_map(|schedule| expand_one(schedule, today, window_end))
        .collect();

    occurrences.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    occurrences
}

fn expand_one(
    schedule: &ScheduleDefinition,
    today: NaiveDate,
    window_end: NaiveDate,
) -> Vec<UpcomingOccurrence> {
    let effective_start = today.max(schedule.start_date);
    let effective_end = schedule.end_date.unwrap_or(window_end).min(window_end);
    if effective_end < effective_start {
        return Vec::new();
    }

    let (first, step) = match &schedule.frequency {
        Frequency::Daily => (effective_start, TimeDelta::days(1)),
        Frequency::Weekly => {
            let target = schedule
                .weekday
                .unwrap_or_else(|| schedule.start_date.weekday().num_days_from_monday());
            let current = effective_start.weekday().num_days_from_monday();
            let offset = (target + 7 - current) % 7;
            (
                effective_start + TimeDelta::days(i64::from(offset)),
                TimeDelta::days(7),
            )
        }
        Frequency::Unsupported(_) => {
            tracing::trace!(
                schedule_id = %schedule.id,
                frequency = %schedule.frequency,
                "Skipping unsupported frequency"
            );
            return Vec::new();
        }
    };

    std::iter::successors(Some(first), |date| Some(*date + step))
        .take_while(|date| *date <= effective_end)
        .map(|date| UpcomingOccurrence::new(schedule, date))
        .collect()
}
