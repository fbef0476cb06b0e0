use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    DatabaseError(#[from] peptrack_db::error::DbError),

    #[error(transparent)]
    CoreError(#[from] peptrack_core::error::CoreError),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0} not configured")]
    NotConfigured(&'static str),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Upstream error: {0}")]
    UpstreamError(String),

    #[error("Export error: {0}")]
    ExportError(String),

    #[error("Diesel error: {0}")]
    DieselError(#[from] diesel::result::Error),
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        Self::UpstreamError(err.to_string())
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
