// Session state shared by the request client and the facade.
//
// Owned by the composition root and passed around by `Arc`: the working
// endpoint cache, the credential store, and the login boundary that a
// 401 sends the user back to.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::credentials::{AuthMode, Credential, CredentialScope, select_credential};
use crate::endpoint::{EndpointResolver, Resolution};
use crate::storage::{SessionStore, StorageError};

/// Where an expired session sends the user.
///
/// The browser console did a hard navigation to its login page; a CLI
/// prints instructions; tests count invocations.
pub trait LoginRedirect: Send + Sync {
    fn redirect_to_login(&self, scope: CredentialScope);
}

/// Redirect that only logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRedirect;

impl LoginRedirect for NoRedirect {
    fn redirect_to_login(&self, scope: CredentialScope) {
        debug!(%scope, "session expired, no login boundary configured");
    }
}

pub struct Session {
    resolver: EndpointResolver,
    store: Arc<dyn SessionStore>,
    redirect: Arc<dyn LoginRedirect>,
}

impl Session {
    pub fn new(
        resolver: EndpointResolver,
        store: Arc<dyn SessionStore>,
        redirect: Arc<dyn LoginRedirect>,
    ) -> Self {
        Self {
            resolver,
            store,
            redirect,
        }
    }

    // ── Endpoint ─────────────────────────────────────────────────────

    pub fn resolver(&self) -> &EndpointResolver {
        &self.resolver
    }

    /// The working base URL, probing on first use.
    pub async fn endpoint(&self) -> String {
        self.resolver.resolve().await
    }

    pub async fn resolve_endpoint(&self) -> Resolution {
        self.resolver.resolve_detailed().await
    }

    /// Force the next request to re-probe the candidates.
    pub async fn invalidate_endpoint(&self) {
        self.resolver.invalidate().await;
    }

    // ── Credentials ──────────────────────────────────────────────────

    pub fn store(&self) -> &dyn SessionStore {
        self.store.as_ref()
    }

    /// Credential for the next request (admin > user > anonymous).
    pub fn credential(&self) -> Credential {
        select_credential(self.store.as_ref())
    }

    /// Credential a request sent under `mode` carries.
    pub fn credential_for(&self, mode: AuthMode) -> Credential {
        mode.credential(self.store.as_ref())
    }

    /// Persist a freshly issued token and, optionally, the identity it
    /// belongs to. Overwrites whatever the scope held before.
    pub fn sign_in(
        &self,
        scope: CredentialScope,
        token: &SecretString,
        identity: Option<&str>,
    ) -> Result<(), StorageError> {
        self.store.set(scope.token_key(), token.expose_secret())?;
        if let Some(identity) = identity {
            self.store.set(scope.identity_key(), identity)?;
        }
        debug!(%scope, "session stored");
        Ok(())
    }

    /// Replace only the token of a scope (token refresh).
    pub fn replace_token(
        &self,
        scope: CredentialScope,
        token: &SecretString,
    ) -> Result<(), StorageError> {
        self.store.set(scope.token_key(), token.expose_secret())
    }

    /// Remove a scope's token and cached identity.
    pub fn sign_out(&self, scope: CredentialScope) -> Result<(), StorageError> {
        self.store.remove(scope.token_key())?;
        self.store.remove(scope.identity_key())?;
        debug!(%scope, "session cleared");
        Ok(())
    }

    /// Cached identity JSON for a scope.
    pub fn identity(&self, scope: CredentialScope) -> Result<Option<String>, StorageError> {
        self.store.get(scope.identity_key())
    }

    /// React to an HTTP 401: purge the scope's session, then send the user
    /// to the login boundary. Storage failures are logged, never raised,
    /// so the redirect always happens.
    pub fn expire(&self, scope: CredentialScope) {
        warn!(%scope, "request unauthorized, clearing session");
        if let Err(e) = self.sign_out(scope) {
            warn!(%scope, error = %e, "failed to clear expired session");
        }
        self.redirect.redirect_to_login(scope);
    }
}
