//! Hoops that place the outbound clients built in `main` into the depot.
//!
//! Both clients are optional: an unconfigured identity provider makes the
//! auth middleware answer 500, an unconfigured LLM makes the lab and insight
//! endpoints fall back to rule-based output.

use std::sync::Arc;

use salvo::async_trait;

use peptrack_service::auth::identity::IdentityProvider;
use peptrack_service::llm::CompletionProvider;

pub type SharedIdentity = Arc<dyn IdentityProvider>;
pub type SharedCompletion = Arc<dyn CompletionProvider>;

pub struct IdentityHandler {
    pub identity: Option<SharedIdentity>,
}

#[async_trait]
impl salvo::Handler for IdentityHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        if let Some(identity) = &self.identity {
            depot.inject(Arc::clone(identity));
        }
    }
}

pub struct CompletionHandler {
    pub llm: Option<SharedCompletion>,
}

#[async_trait]
impl salvo::Handler for CompletionHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        if let Some(llm) = &self.llm {
            depot.inject(Arc::clone(llm));
        }
    }
}

/// Returns the identity provider, if one was configured.
#[must_use]
pub fn get_identity_from_depot(depot: &salvo::Depot) -> Option<SharedIdentity> {
    depot.obtain::<SharedIdentity>().ok().cloned()
}

/// Returns the completion provider, if one was configured.
#[must_use]
pub fn get_llm_from_depot(depot: &salvo::Depot) -> Option<SharedCompletion> {
    depot.obtain::<SharedCompletion>().ok().cloned()
}
