use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};

use crate::db::schema;

pub use crate::db::enums::{ItemType, ScheduleStatus};

/// A recurring dose schedule as stored.
///
/// `frequency` stays free text; interpretation happens in the expander.
#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = schema::schedules)]
#[diesel(check_for_backend(Pg))]
pub struct Schedule {
    pub id: uuid::Uuid,
    pub user_id: uuid::Uuid,
    pub name: String,
    pub item_type: Option<ItemType>,
    pub item_id: Option<uuid::Uuid>,
    pub dose: Option<String>,
    pub frequency: String,
    pub weekday: Option<i16>,
    pub start_date: chrono::NaiveDate,
    pub end_date: Option<chrono::NaiveDate>,
    pub time_of_day: Option<String>,
    pub status: ScheduleStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::schedules)]
pub struct NewSchedule {
    pub user_id: uuid::Uuid,
    pub name: String,
    pub item_type: Option<ItemType>,
    pub item_id: Option<uuid::Uuid>,
    pub dose: Option<String>,
    pub frequency: String,
    pub weekday: Option<i16>,
    pub start_date: chrono::NaiveDate,
    pub end_date: Option<chrono::NaiveDate>,
    pub time_of_day: Option<String>,
    pub status: ScheduleStatus,
}
