// ── Campus facade ──
//
// One method per backend operation, grouped by resource area under
// `services/`. The facade builds the request, hands it to `ApiClient`,
// and decodes the payload; it does no validation of its own.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use campus_api::{
    ApiClient, DeploymentConfig, EndpointResolver, LoginRedirect, RequestContext, Session,
    SessionStore, TransportConfig,
};

use crate::error::CoreError;
use crate::fallback::with_fallback;
use crate::model::Page;
use crate::query::ListQuery;

/// Handle to the Campus API. Cheap to clone.
#[derive(Clone)]
pub struct Campus {
    client: Arc<ApiClient>,
}

impl Campus {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Wire up the whole stack: an HTTP-probing resolver for `deployment`,
    /// the session over `store`, and the client.
    pub fn build(
        deployment: &DeploymentConfig,
        transport: &TransportConfig,
        store: Arc<dyn SessionStore>,
        redirect: Arc<dyn LoginRedirect>,
    ) -> Result<Self, CoreError> {
        let resolver = EndpointResolver::for_deployment(deployment, transport)?;
        let session = Arc::new(Session::new(resolver, store, redirect));
        let client = ApiClient::new(session, transport)?;
        Ok(Self::new(Arc::new(client)))
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn session(&self) -> &Session {
        self.client.session()
    }

    // ── Shared plumbing for services ─────────────────────────────────

    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        ctx: RequestContext,
        keys: &[&str],
    ) -> Result<T, CoreError> {
        let payload = self.client.dispatch(ctx).await?;
        Ok(payload.extract(keys)?)
    }

    /// Send a request whose response carries nothing the caller needs
    /// beyond the server message.
    pub(crate) async fn send(&self, ctx: RequestContext) -> Result<Option<String>, CoreError> {
        let payload = self.client.dispatch(ctx).await?;
        Ok(payload.message().map(str::to_owned))
    }

    /// Send `ctx` with the list query's page, limit and filters attached.
    pub(crate) async fn fetch_page<T: DeserializeOwned>(
        &self,
        ctx: RequestContext,
        query: &ListQuery,
        resource: &str,
    ) -> Result<Page<T>, CoreError> {
        let payload = self.client.dispatch(ctx.query(query.to_query())).await?;
        Page::from_payload(payload, resource)
    }

    /// GET `primary`, falling back to `alternate` once on any failure.
    pub(crate) async fn fetch_dual<T: DeserializeOwned>(
        &self,
        primary: &str,
        alternate: &str,
        query: Vec<(String, String)>,
        keys: &[&str],
    ) -> Result<T, CoreError> {
        let first = RequestContext::get(primary).query(query.clone());
        with_fallback(self.fetch(first, keys), || {
            self.fetch(RequestContext::get(alternate).query(query), keys)
        })
        .await
    }
}
