pub mod depot;
pub mod identity;

/// The caller resolved from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AuthenticatedUser {
    pub id: uuid::Uuid,
    pub email: Option<String>,
}
