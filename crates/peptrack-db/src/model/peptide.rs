use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};

use crate::db::schema;

#[derive(Debug, Clone, PartialEq, Identifiable, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = schema::peptides)]
#[diesel(check_for_backend(Pg))]
pub struct Peptide {
    pub id: uuid::Uuid,
    pub user_id: uuid::Uuid,
    pub name: String,
    pub units_remaining: Option<f64>,
    pub expires_on: Option<chrono::NaiveDate>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::peptides)]
pub struct NewPeptide {
    pub user_id: uuid::Uuid,
    pub name: String,
    pub units_remaining: Option<f64>,
    pub expires_on: Option<chrono::NaiveDate>,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, AsChangeset, Deserialize)]
#[diesel(table_name = schema::peptides)]
pub struct PeptideChanges {
    pub name: Option<String>,
    pub units_remaining: Option<f64>,
    pub expires_on: Option<chrono::NaiveDate>,
}

impl PeptideChanges {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.units_remaining.is_none() && self.expires_on.is_none()
    }
}
