use salvo::cors::{AllowHeaders, AllowMethods, AllowOrigin, Cors, CorsHandler};
use salvo::http::HeaderValue;

use crate::config::CorsConfig;

/// ## Summary
/// Builds the CORS handler from the configured origin list; `*` (or an
/// empty list) allows any origin.
#[must_use]
pub fn cors_handler(config: &CorsConfig) -> CorsHandler {
    let origins = if config.allows_any() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(config.origins.iter().filter_map(|origin| {
            HeaderValue::from_str(origin)
                .inspect_err(|err| {
                    tracing::warn!(%origin, error = %err, "Ignoring invalid CORS origin");
                })
                .ok()
        }))
    };

    Cors::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::any())
        .allow_headers(AllowHeaders::any())
        .into_handler()
}
