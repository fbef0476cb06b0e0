use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};

use crate::db::schema;

pub use crate::db::enums::InsightSource;

/// Stored output of a lab summary or a tracking insight run.
#[derive(Debug, Clone, PartialEq, Identifiable, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = schema::insights)]
#[diesel(check_for_backend(Pg))]
pub struct Insight {
    pub id: uuid::Uuid,
    pub user_id: uuid::Uuid,
    pub source_type: InsightSource,
    pub source_id: Option<uuid::Uuid>,
    pub content: Option<String>,
    pub summary: Option<serde_json::Value>,
    pub tips: Option<serde_json::Value>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::insights)]
pub struct NewInsight {
    pub user_id: uuid::Uuid,
    pub source_type: InsightSource,
    pub source_id: Option<uuid::Uuid>,
    pub content: Option<String>,
    pub summary: Option<serde_json::Value>,
    pub tips: Option<serde_json::Value>,
}
