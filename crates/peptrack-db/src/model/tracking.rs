use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};

use crate::db::schema;

/// One daily log of body metrics and subjective scores.
#[derive(Debug, Clone, PartialEq, Identifiable, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = schema::daily_tracking)]
#[diesel(check_for_backend(Pg))]
pub struct DailyTracking {
    pub id: uuid::Uuid,
    pub user_id: uuid::Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub peptide1_id: Option<uuid::Uuid>,
    pub peptide2_id: Option<uuid::Uuid>,
    pub peptide3_id: Option<uuid::Uuid>,
    pub weight_lbs: Option<f64>,
    pub waist_in: Option<f64>,
    pub bp_am: Option<String>,
    pub bp_pm: Option<String>,
    pub body_fat_pct: Option<f64>,
    pub muscle_mass_pct: Option<f64>,
    pub resting_hr_bpm: Option<f64>,
    pub energy: Option<i32>,
    pub appetite: Option<i32>,
    pub performance: Option<i32>,
    pub notes: Option<String>,
}

/// Insert payload; a `None` `created_at` leaves the column default (`now()`).
#[derive(Debug, Clone, Default, Insertable)]
#[diesel(table_name = schema::daily_tracking)]
pub struct NewDailyTracking {
    pub user_id: uuid::Uuid,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub peptide1_id: Option<uuid::Uuid>,
    pub peptide2_id: Option<uuid::Uuid>,
    pub peptide3_id: Option<uuid::Uuid>,
    pub weight_lbs: Option<f64>,
    pub waist_in: Option<f64>,
    pub bp_am: Option<String>,
    pub bp_pm: Option<String>,
    pub body_fat_pct: Option<f64>,
    pub muscle_mass_pct: Option<f64>,
    pub resting_hr_bpm: Option<f64>,
    pub energy: Option<i32>,
    pub appetite: Option<i32>,
    pub performance: Option<i32>,
    pub notes: Option<String>,
}
