use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};

use crate::db::schema;

#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = schema::supplements)]
#[diesel(check_for_backend(Pg))]
pub struct Supplement {
    pub id: uuid::Uuid,
    pub user_id: uuid::Uuid,
    pub name: String,
    pub dose: Option<String>,
    pub schedule: Option<String>,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::supplements)]
pub struct NewSupplement {
    pub user_id: uuid::Uuid,
    pub name: String,
    pub dose: Option<String>,
    pub schedule: Option<String>,
    pub notes: Option<String>,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, AsChangeset, Deserialize)]
#[diesel(table_name = schema::supplements)]
pub struct SupplementChanges {
    pub name: Option<String>,
    pub dose: Option<String>,
    pub schedule: Option<String>,
    pub notes: Option<String>,
}

impl SupplementChanges {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.dose.is_none()
            && self.schedule.is_none()
            && self.notes.is_none()
    }
}
