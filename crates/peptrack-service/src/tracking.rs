//! Daily tracking entries.

use chrono::{DateTime, Utc};
use peptrack_core::util::date::{DateRange, parse_iso_datetime};
use peptrack_db::db::connection::DbConnection;
use peptrack_db::db::query::tracking as tracking_query;
use peptrack_db::model::tracking::{DailyTracking, NewDailyTracking};
use serde::Deserialize;

use crate::error::{ServiceError, ServiceResult};

const INVALID_DATE: &str = "Invalid date format. Use ISO 8601.";
const INVALID_RANGE: &str = "Invalid start/end format. Use ISO 8601.";

/// Client payload for `POST /tracking`.
///
/// The percentage and heart-rate fields accept both the short column names
/// and the longer names older clients send.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackingRequest {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub peptide1_id: Option<uuid::Uuid>,
    #[serde(default)]
    pub peptide2_id: Option<uuid::Uuid>,
    #[serde(default)]
    pub peptide3_id: Option<uuid::Uuid>,
    #[serde(default)]
    pub weight_lbs: Option<f64>,
    #[serde(default)]
    pub waist_in: Option<f64>,
    #[serde(default)]
    pub bp_am: Option<String>,
    #[serde(default)]
    pub bp_pm: Option<String>,
    #[serde(default, alias = "body_fat_percent")]
    pub body_fat_pct: Option<f64>,
    #[serde(default, alias = "muscle_mass_percent")]
    pub muscle_mass_pct: Option<f64>,
    #[serde(default, alias = "resting_hr")]
    pub resting_hr_bpm: Option<f64>,
    #[serde(default)]
    pub energy: Option<i32>,
    #[serde(default)]
    pub appetite: Option<i32>,
    #[serde(default)]
    pub performance: Option<i32>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl TrackingRequest {
    /// ## Summary
    /// Binds the payload to `user_id`; a provided `date` becomes `created_at`.
    ///
    /// ## Errors
    /// Returns `InvalidInput` if `date` is not ISO 8601.
    pub fn into_new_tracking(self, user_id: uuid::Uuid) -> ServiceResult<NewDailyTracking> {
        let created_at = match self.date.as_deref().filter(|raw| !raw.trim().is_empty()) {
            Some(raw) => Some(
                parse_iso_datetime("date", raw)
                    .map_err(|_e| ServiceError::InvalidInput(INVALID_DATE.to_string()))?,
            ),
            None => None,
        };

        Ok(NewDailyTracking {
            user_id,
            created_at,
            peptide1_id: self.peptide1_id,
            peptide2_id: self.peptide2_id,
            peptide3_id: self.peptide3_id,
            weight_lbs: self.weight_lbs,
            waist_in: self.waist_in,
            bp_am: self.bp_am,
            bp_pm: self.bp_pm,
            body_fat_pct: self.body_fat_pct,
            muscle_mass_pct: self.muscle_mass_pct,
            resting_hr_bpm: self.resting_hr_bpm,
            energy: self.energy,
            appetite: self.appetite,
            performance: self.performance,
            notes: self.notes,
        })
    }
}

/// ## Summary
/// Resolves raw listing bounds; a missing `start` falls `lookback_days`
/// before `now` and a missing `end` is `now`.
///
/// ## Errors
/// Returns `InvalidInput` if either bound is malformed.
pub fn resolve_range(
    start: Option<&str>,
    end: Option<&str>,
    now: DateTime<Utc>,
    lookback_days: i64,
) -> ServiceResult<DateRange> {
    DateRange::resolve(start, end, now, lookback_days)
        .map_err(|_e| ServiceError::InvalidInput(INVALID_RANGE.to_string()))
}

/// ## Summary
/// Stores an entry built by [`TrackingRequest::into_new_tracking`].
///
/// ## Errors
/// Returns a database error if the insert fails.
#[tracing::instrument(skip(conn, row), fields(user_id = %row.user_id))]
pub async fn create(
    conn: &mut DbConnection<'_>,
    row: NewDailyTracking,
) -> ServiceResult<DailyTracking> {
    let created = tracking_query::create(conn, &row).await?;
    tracing::debug!(tracking_id = %created.id, "Tracking entry stored");
    Ok(created)
}

/// ## Summary
/// Lists entries within `range`, both ends inclusive, oldest first.
///
/// ## Errors
/// Returns a database error if the query fails.
#[tracing::instrument(skip(conn), fields(user_id = %user_id))]
pub async fn list(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
    range: DateRange,
) -> ServiceResult<Vec<DailyTracking>> {
    Ok(tracking_query::list_range(conn, user_id, range.start, range.end).await?)
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn latest(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
) -> ServiceResult<Option<DailyTracking>> {
    Ok(tracking_query::latest(conn, user_id).await?)
}
