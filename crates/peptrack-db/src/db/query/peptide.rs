//! Peptide inventory queries.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::peptides;
use crate::model::peptide::{NewPeptide, Peptide, PeptideChanges};

/// ## Summary
/// Returns a query for the user's peptides ordered by name.
#[must_use]
pub fn for_user(user_id: uuid::Uuid) -> peptides::BoxedQuery<'static, diesel::pg::Pg> {
    peptides::table
        .filter(peptides::user_id.eq(user_id))
        .order(peptides::name.asc())
        .into_boxed()
}

/// ## Summary
/// Returns a query for a single peptide owned by `user_id`.
#[must_use]
pub fn by_id(
    user_id: uuid::Uuid,
    id: uuid::Uuid,
) -> peptides::BoxedQuery<'static, diesel::pg::Pg> {
    peptides::table
        .filter(peptides::user_id.eq(user_id))
        .filter(peptides::id.eq(id))
        .into_boxed()
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
) -> diesel::QueryResult<Vec<Peptide>> {
    for_user(user_id).select(Peptide::as_select()).load(conn).await
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn get(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
    id: uuid::Uuid,
) -> diesel::QueryResult<Option<Peptide>> {
    by_id(user_id, id)
        .select(Peptide::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Errors
/// Returns a database error if the insert fails.
pub async fn create(conn: &mut DbConnection<'_>, row: &NewPeptide) -> diesel::QueryResult<Peptide> {
    diesel::insert_into(peptides::table)
        .values(row)
        .returning(Peptide::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Applies `changes` to the user's peptide and returns the updated row, or
/// `None` when no such row exists. `changes` must not be empty.
///
/// ## Errors
/// Returns a database error if the update fails.
pub async fn update(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
    id: uuid::Uuid,
    changes: &PeptideChanges,
) -> diesel::QueryResult<Option<Peptide>> {
    diesel::update(
        peptides::table
            .filter(peptides::user_id.eq(user_id))
            .filter(peptides::id.eq(id)),
    )
    .set(changes)
    .returning(Peptide::as_returning())
    .get_result(conn)
    .await
    .optional()
}

/// ## Summary
/// Deletes the user's peptide, returning the number of rows removed.
///
/// ## Errors
/// Returns a database error if the delete fails.
pub async fn delete(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
    id: uuid::Uuid,
) -> diesel::QueryResult<usize> {
    diesel::delete(
        peptides::table
            .filter(peptides::user_id.eq(user_id))
            .filter(peptides::id.eq(id)),
    )
    .execute(conn)
    .await
}
