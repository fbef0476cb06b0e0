//! Payload checks shared by the create and update paths.

use crate::error::{ServiceError, ServiceResult};

/// ## Summary
/// Rejects a text field that is empty after trimming.
///
/// ## Errors
/// Returns `ValidationError` naming `field`.
pub fn require_non_blank(field: &'static str, value: &str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        Err(ServiceError::ValidationError(format!(
            "{field} must not be empty"
        )))
    } else {
        Ok(())
    }
}
