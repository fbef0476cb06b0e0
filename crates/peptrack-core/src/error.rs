//! Errors raised while turning raw client values into domain values.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// The value could not be parsed at all (maps to 400).
    #[error("invalid {field} '{value}': {reason}")]
    InvalidInput {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// The value parsed but lies outside what the field accepts (maps to 422).
    #[error("{field} {expected}, got {value}")]
    ValidationError {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    /// A request hoop did not place the named state in the depot.
    #[error("{0} missing from request state")]
    MissingState(&'static str),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
