use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Response, Scribe};
use serde::Serialize;
use thiserror::Error;

use peptrack_core::error::CoreError;
use peptrack_db::error::DbError;
use peptrack_service::error::ServiceError;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    DatabaseError(#[from] DbError),

    #[error(transparent)]
    CoreError(#[from] CoreError),

    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl AppError {
    /// ## Summary
    /// Maps the error to the HTTP status the client sees.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ServiceError(err) => service_status(err),
            Self::DatabaseError(err) => db_status(err),
            Self::CoreError(err) => core_status(err),
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::InvalidBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

fn service_status(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::NotAuthenticated | ServiceError::InvalidToken => StatusCode::UNAUTHORIZED,
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        ServiceError::UpstreamError(_) => StatusCode::BAD_GATEWAY,
        ServiceError::DatabaseError(db) => db_status(db),
        ServiceError::CoreError(core) => core_status(core),
        ServiceError::NotConfigured(_)
        | ServiceError::ExportError(_)
        | ServiceError::DieselError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn db_status(err: &DbError) -> StatusCode {
    match err {
        DbError::PoolError(_) => StatusCode::SERVICE_UNAVAILABLE,
        DbError::CoreError(core) => core_status(core),
        DbError::DatabaseError(_) | DbError::MigrationError(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn core_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::ValidationError { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        CoreError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        CoreError::MissingState(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl Scribe for AppError {
    fn render(self, res: &mut Response) {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, %status, "Request failed");
        } else {
            tracing::debug!(error = %self, %status, "Request rejected");
        }

        res.status_code(status);
        res.render(Json(ErrorResponse {
            detail: self.to_string(),
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_errors_are_unauthorized() {
        assert_eq!(
            AppError::from(ServiceError::NotAuthenticated).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::from(ServiceError::InvalidToken).to_string(),
            "Invalid or expired token"
        );
    }

    #[test]
    fn test_input_errors_split_between_400_and_422() {
        assert_eq!(
            AppError::from(ServiceError::InvalidInput("bad date".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(ServiceError::ValidationError("days".into())).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::from(ServiceError::CoreError(CoreError::ValidationError {
                field: "time_of_day",
                value: "7am".into(),
                expected: "must be HH:MM (24h)",
            }))
            .status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_missing_rows_and_configuration() {
        let not_found = AppError::from(ServiceError::NotFound("Schedule"));
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.to_string(), "Schedule not found");

        let not_configured = AppError::from(ServiceError::NotConfigured("Identity provider"));
        assert_eq!(
            not_configured.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            not_configured.to_string(),
            "Identity provider not configured"
        );
    }

    #[test]
    fn test_pool_exhaustion_is_service_unavailable() {
        let err = AppError::from(DbError::PoolError(
            diesel_async::pooled_connection::bb8::RunError::TimedOut,
        ));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
