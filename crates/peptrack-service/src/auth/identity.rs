//! Bearer token verification against the hosted identity provider.

use std::future::Future;
use std::pin::Pin;

use peptrack_core::config::IdentityConfig;
use serde::Deserialize;

use crate::error::{ServiceError, ServiceResult};

use super::AuthenticatedUser;

const USER_ENDPOINT: &str = "/auth/v1/user";

/// Resolves a bearer token to the user it was issued for.
///
/// Handlers receive an `Arc<dyn IdentityProvider>` through the depot so
/// tests can substitute a fake.
pub trait IdentityProvider: Send + Sync {
    /// ## Errors
    /// Returns `InvalidToken` when the provider rejects the token, or
    /// `UpstreamError` when it cannot be reached.
    fn verify<'a>(
        &'a self,
        token: &'a str,
    ) -> Pin<Box<dyn Future<Output = ServiceResult<AuthenticatedUser>> + Send + 'a>>;
}

/// Identity client for a Supabase-compatible `/auth/v1/user` endpoint.
#[derive(Clone)]
pub struct SupabaseIdentity {
    http: reqwest::Client,
    user_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

impl SupabaseIdentity {
    /// ## Summary
    /// Builds a client, failing when the URL or key is missing.
    ///
    /// ## Errors
    /// Returns `NotConfigured` if the identity section is incomplete.
    pub fn from_config(config: &IdentityConfig) -> ServiceResult<Self> {
        Self::try_from_config(config).ok_or(ServiceError::NotConfigured("Identity provider"))
    }

    /// Builds a client, or `None` when the identity section is incomplete.
    #[must_use]
    pub fn try_from_config(config: &IdentityConfig) -> Option<Self> {
        if !config.is_configured() {
            return None;
        }
        let base_url = config.url.as_deref()?.trim_end_matches('/');
        let api_key = config.api_key()?.to_string();

        Some(Self {
            http: reqwest::Client::new(),
            user_url: format!("{base_url}{USER_ENDPOINT}"),
            api_key,
        })
    }

    #[tracing::instrument(skip_all)]
    async fn fetch_user(&self, token: &str) -> ServiceResult<AuthenticatedUser> {
        let response = self
            .http
            .get(&self.user_url)
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "Identity provider rejected token");
            return Err(ServiceError::InvalidToken);
        }

        let body: UserResponse = response
            .json()
            .await
            .map_err(|_e| ServiceError::InvalidToken)?;
        user_from_response(body)
    }
}

impl IdentityProvider for SupabaseIdentity {
    fn verify<'a>(
        &'a self,
        token: &'a str,
    ) -> Pin<Box<dyn Future<Output = ServiceResult<AuthenticatedUser>> + Send + 'a>> {
        Box::pin(self.fetch_user(token))
    }
}

fn user_from_response(body: UserResponse) -> ServiceResult<AuthenticatedUser> {
    let id = body
        .id
        .as_deref()
        .and_then(|raw| uuid::Uuid::parse_str(raw).ok())
        .ok_or(ServiceError::InvalidToken)?;

    Ok(AuthenticatedUser {
        id,
        email: body.email,
    })
}
