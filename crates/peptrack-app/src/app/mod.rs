pub mod api;

use salvo::Router;

use crate::client_handler::{CompletionHandler, IdentityHandler, SharedCompletion, SharedIdentity};
use crate::config::{ConfigHandler, Settings};
use crate::db_handler::DbProviderHandler;
use peptrack_db::db::DbProvider;

/// ## Summary
/// Wires the per-request depot injection in front of every route.
///
/// `main` passes the pool and the clients it built; tests pass fakes.
#[must_use]
pub fn router<T>(
    settings: Settings,
    provider: T,
    identity: Option<SharedIdentity>,
    llm: Option<SharedCompletion>,
) -> Router
where
    T: DbProvider + Send + Sync + Clone + 'static,
{
    Router::new()
        .hoop(DbProviderHandler { provider })
        .hoop(ConfigHandler::new(settings))
        .hoop(IdentityHandler { identity })
        .hoop(CompletionHandler { llm })
        .push(api::routes())
}
