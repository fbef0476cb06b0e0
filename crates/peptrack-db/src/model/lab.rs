use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};

use crate::db::schema;

/// A lab panel; `values` is a JSON object of metric name to reading.
#[derive(Debug, Clone, PartialEq, Identifiable, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = schema::labs)]
#[diesel(check_for_backend(Pg))]
pub struct Lab {
    pub id: uuid::Uuid,
    pub user_id: uuid::Uuid,
    pub panel_name: String,
    pub values: serde_json::Value,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::labs)]
pub struct NewLab {
    pub user_id: uuid::Uuid,
    pub panel_name: String,
    pub values: serde_json::Value,
    pub notes: Option<String>,
}
