mod extract;
mod health;
mod v1;

use salvo::Router;

use crate::middleware::auth::AuthMiddleware;

// Re-export route constants from core
pub use peptrack_core::constants::{
    API_ROUTE_COMPONENT, API_V1_ROUTE_PREFIX, API_VERSION_COMPONENT,
};

/// ## Summary
/// Constructs the full router: the unauthenticated health checks and the
/// versioned API, where everything except health and ping-db requires a
/// bearer token.
#[must_use]
pub fn routes() -> Router {
    Router::new().push(health::root_routes()).push(
        Router::with_path(API_ROUTE_COMPONENT).push(
            Router::with_path(API_VERSION_COMPONENT)
                .push(health::routes())
                .push(
                    Router::new()
                        .hoop(AuthMiddleware::default())
                        .push(v1::routes()),
                )
                .push(
                    Router::new()
                        .hoop(AuthMiddleware::with_query_token())
                        .push(v1::export_routes()),
                ),
        ),
    )
}
