//! Authenticated `/api/v1` resources.

mod cycles;
mod export;
mod insights;
mod labs;
mod peptides;
mod schedule;
mod supplements;
mod tracking;

use salvo::Router;

/// Routes behind the header-only auth hoop.
#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(tracking::routes())
        .push(peptides::routes())
        .push(supplements::routes())
        .push(schedule::routes())
        .push(cycles::routes())
        .push(labs::routes())
        .push(insights::routes())
}

/// Export routes, which also accept `?token=`.
#[must_use]
pub fn export_routes() -> Router {
    export::routes()
}
