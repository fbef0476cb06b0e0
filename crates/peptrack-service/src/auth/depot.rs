//! Depot helpers for passing the authenticated user from middleware to
//! handlers.

use crate::error::{ServiceError, ServiceResult};

use super::AuthenticatedUser;

pub mod depot_keys {
    pub const AUTHENTICATED_USER: &str = "__authenticated_user";
}

/// Stores the verified caller for downstream handlers.
pub fn insert_user(depot: &mut salvo::Depot, user: AuthenticatedUser) {
    depot.insert(depot_keys::AUTHENTICATED_USER, user);
}

/// Get the authenticated user from the depot.
///
/// ## Errors
///
/// Returns `NotAuthenticated` if the auth middleware did not run or rejected
/// the request.
pub fn get_user_from_depot(depot: &salvo::Depot) -> ServiceResult<&AuthenticatedUser> {
    depot
        .get::<AuthenticatedUser>(depot_keys::AUTHENTICATED_USER)
        .map_err(|_e| ServiceError::NotAuthenticated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_user_is_not_authenticated() {
        let depot = salvo::Depot::new();
        assert!(matches!(
            get_user_from_depot(&depot),
            Err(ServiceError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_inserted_user_round_trips() {
        let mut depot = salvo::Depot::new();
        let user = AuthenticatedUser {
            id: uuid::Uuid::new_v4(),
            email: Some("user@example.com".to_string()),
        };
        insert_user(&mut depot, user.clone());

        assert_eq!(get_user_from_depot(&depot).unwrap(), &user);
    }
}
