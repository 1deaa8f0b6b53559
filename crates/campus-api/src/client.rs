// Request client
//
// Single point of HTTP dispatch. Every call goes through the same two
// interception steps: before sending, the credential the request's
// `AuthMode` selects is attached as a bearer token; after receiving, a
// 401 purges the matching session scope and redirects to the login
// boundary, other failures are turned into typed errors, and successful
// bodies are unwrapped from the envelope.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::{debug, trace};
use url::Url;

use crate::credentials::{AuthMode, CredentialScope};
use crate::envelope::{Envelope, Payload, error_details};
use crate::error::Error;
use crate::request::RequestContext;
use crate::session::Session;
use crate::transport::TransportConfig;

/// HTTP client for the Campus API.
///
/// Cheap to share behind an `Arc`; holds no per-request state. The base
/// URL is looked up through the session on every call, so an endpoint
/// invalidation takes effect on the next request.
pub struct ApiClient {
    http: reqwest::Client,
    session: Arc<Session>,
    timeout_secs: u64,
}

impl ApiClient {
    /// Build a client with the transport's timeout and JSON defaults.
    pub fn new(session: Arc<Session>, transport: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            http: transport.build_client()?,
            session,
            timeout_secs: transport.timeout_secs(),
        })
    }

    /// Wrap an existing `reqwest::Client` (tests, shared pools).
    pub fn with_client(http: reqwest::Client, session: Arc<Session>, timeout_secs: u64) -> Self {
        Self {
            http,
            session,
            timeout_secs,
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    // ── Request helpers ──────────────────────────────────────────────

    pub async fn get(&self, path: &str) -> Result<Payload, Error> {
        self.dispatch(RequestContext::get(path)).await
    }

    pub async fn get_with_query(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<Payload, Error> {
        self.dispatch(RequestContext::get(path).query(query)).await
    }

    pub async fn post(&self, path: &str, body: &(impl Serialize + Sync)) -> Result<Payload, Error> {
        self.dispatch(RequestContext::post(path).json(body)?).await
    }

    /// POST without a body.
    pub async fn post_empty(&self, path: &str) -> Result<Payload, Error> {
        self.dispatch(RequestContext::post(path)).await
    }

    pub async fn put(&self, path: &str, body: &(impl Serialize + Sync)) -> Result<Payload, Error> {
        self.dispatch(RequestContext::put(path).json(body)?).await
    }

    pub async fn patch(&self, path: &str, body: &(impl Serialize + Sync)) -> Result<Payload, Error> {
        self.dispatch(RequestContext::patch(path).json(body)?).await
    }

    /// PATCH without a body.
    pub async fn patch_empty(&self, path: &str) -> Result<Payload, Error> {
        self.dispatch(RequestContext::patch(path)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Payload, Error> {
        self.dispatch(RequestContext::delete(path)).await
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    /// Send one request through the interception pipeline.
    pub async fn dispatch(&self, ctx: RequestContext) -> Result<Payload, Error> {
        let RequestContext {
            method,
            segments,
            query,
            body,
            headers,
            auth,
        } = ctx;

        let url = self.url(&segments).await?;
        debug!("{method} {url}");

        let mut builder = self.http.request(method, url).headers(headers);
        if !query.is_empty() {
            trace!(?query, "query parameters");
            builder = builder.query(&query);
        }
        if let Some(ref body) = body {
            builder = builder.json(body);
        }

        let (builder, sent) = self.apply_auth(builder, auth);
        let resp = builder.send().await.map_err(|e| self.transport_error(e))?;
        self.intercept_response(resp, auth, sent).await
    }

    /// Upload one file as `multipart/form-data`.
    ///
    /// The multipart content type replaces the client's JSON default.
    pub async fn upload(
        &self,
        route: &str,
        field: &str,
        file_name: &str,
        bytes: Vec<u8>,
        mime: &str,
    ) -> Result<Payload, Error> {
        let ctx = RequestContext::post(route);
        let url = self.url(&ctx.segments).await?;
        debug!("POST {url} (multipart, {} bytes)", bytes.len());

        let part = Part::bytes(bytes)
            .file_name(file_name.to_owned())
            .mime_str(mime)?;
        let form = Form::new().part(field.to_owned(), part);

        let (builder, sent) = self.apply_auth(self.http.post(url).multipart(form), ctx.auth);
        let resp = builder.send().await.map_err(|e| self.transport_error(e))?;
        self.intercept_response(resp, ctx.auth, sent).await
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// `{resolved_base}/{segment}/...`, each segment percent-encoded.
    async fn url(&self, segments: &[String]) -> Result<Url, Error> {
        let base = self.session.endpoint().await;
        let mut url = Url::parse(base.trim_end_matches('/'))?;
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── Interception ─────────────────────────────────────────────────

    /// Attach the credential `auth` selects as a bearer token.
    ///
    /// Never fails: an unreadable store just means an anonymous request.
    fn apply_auth(
        &self,
        builder: reqwest::RequestBuilder,
        auth: AuthMode,
    ) -> (reqwest::RequestBuilder, Option<CredentialScope>) {
        let credential = self.session.credential_for(auth);
        let scope = credential.scope();
        match credential.bearer() {
            Some(token) => {
                trace!(scope = ?scope, "attaching bearer token");
                (builder.bearer_auth(token.expose_secret()), scope)
            }
            None => (builder, None),
        }
    }

    /// Inspect the status: purge on 401, type other failures, unwrap
    /// the envelope on success.
    async fn intercept_response(
        &self,
        resp: reqwest::Response,
        auth: AuthMode,
        sent: Option<CredentialScope>,
    ) -> Result<Payload, Error> {
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED {
            let body = resp.text().await.unwrap_or_default();
            let (message, _) = error_details(status, &body);
            match auth.expiry_scope(sent) {
                Some(scope) => self.session.expire(scope),
                None => debug!(%message, "unauthenticated request rejected, session kept"),
            }
            return Err(Error::Unauthorized {
                message,
                scope: sent,
            });
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let (message, payload) = error_details(status, &body);
            debug!(%status, %message, "request failed");
            return Err(Error::Api {
                status: status.as_u16(),
                message,
                payload,
            });
        }

        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        Envelope::decode(&body)?.into_result()
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            Error::Transport(err)
        }
    }
}
