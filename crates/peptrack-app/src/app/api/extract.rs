//! Request decoding shared by the v1 handlers.

use salvo::Request;
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};

/// ## Summary
/// Parses the JSON body.
///
/// ## Errors
/// Returns `InvalidBody` (422) when the body is not valid JSON for `T`.
pub async fn json_body<T: DeserializeOwned + Send>(req: &mut Request) -> AppResult<T> {
    req.parse_json::<T>()
        .await
        .map_err(|err| AppError::InvalidBody(err.to_string()))
}

/// ## Summary
/// Reads the `{id}` path segment as a UUID.
///
/// ## Errors
/// Returns `BadRequest` when the segment is not a UUID.
pub fn path_id(req: &Request) -> AppResult<uuid::Uuid> {
    req.param::<String>("id")
        .and_then(|raw| uuid::Uuid::parse_str(&raw).ok())
        .ok_or_else(|| AppError::BadRequest("Invalid id".to_string()))
}

/// Non-empty query parameter.
#[must_use]
pub fn query_param(req: &Request, key: &str) -> Option<String> {
    req.query::<String>(key).filter(|value| !value.is_empty())
}
