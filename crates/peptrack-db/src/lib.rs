//! Persistence layer: diesel schema, row models and owner-scoped queries
//! against the hosted Postgres database.

pub mod db;
pub mod error;
pub mod model;
