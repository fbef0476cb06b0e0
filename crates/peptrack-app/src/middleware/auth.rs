use salvo::Depot;
use salvo::http::header::AUTHORIZATION;

use crate::client_handler::get_identity_from_depot;
use crate::error::AppError;
use peptrack_service::auth::depot::insert_user;
use peptrack_service::error::ServiceError;

/// ## Summary
/// Middleware handler for bearer-token authentication.
///
/// Resolves the token through the injected identity provider and stores the
/// caller in the depot. Export routes set `accept_query_token` so browsers
/// can download files through a plain link with `?token=`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthMiddleware {
    pub accept_query_token: bool,
}

impl AuthMiddleware {
    /// Auth that also accepts `?token=`, which wins over the header.
    #[must_use]
    pub const fn with_query_token() -> Self {
        Self {
            accept_query_token: true,
        }
    }
}

/// ## Summary
/// Extracts the token from an `Authorization` header value.
///
/// The scheme is matched case-insensitively; an empty token is rejected.
#[must_use]
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

fn request_token(req: &salvo::Request, accept_query_token: bool) -> Option<String> {
    if accept_query_token
        && let Some(token) = req
            .query::<String>("token")
            .filter(|token| !token.trim().is_empty())
    {
        return Some(token);
    }

    req.headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .map(str::to_string)
}

/// ## Summary
/// Authenticates the request and stores the user in the depot.
///
/// ## Side Effects
/// Inserts the authenticated user into the depot for downstream handlers.
///
/// ## Errors
/// Responds 401 when the token is missing or rejected, and 500 when no
/// identity provider is configured.
#[salvo::async_trait]
impl salvo::Handler for AuthMiddleware {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        tracing::trace!("Authenticating request");

        if req.method() == salvo::http::Method::OPTIONS {
            return;
        }

        let Some(token) = request_token(req, self.accept_query_token) else {
            tracing::debug!("Request carries no bearer token");
            res.render(AppError::from(ServiceError::NotAuthenticated));
            ctrl.skip_rest();
            return;
        };

        let Some(identity) = get_identity_from_depot(depot) else {
            tracing::error!("No identity provider configured");
            res.render(AppError::from(ServiceError::NotConfigured(
                "Identity provider",
            )));
            ctrl.skip_rest();
            return;
        };

        match identity.verify(&token).await {
            Ok(user) => {
                tracing::debug!(user_id = %user.id, "User authenticated successfully");
                insert_user(depot, user);
            }
            Err(err) => {
                tracing::debug!(error = %err, "Token verification failed");
                res.render(AppError::from(ServiceError::InvalidToken));
                ctrl.skip_rest();
            }
        }
    }
}
