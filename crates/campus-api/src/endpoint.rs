// Endpoint resolution
//
// Builds a prioritized list of candidate base URLs from the deployment,
// probes them in order, and caches the first one that answers. When
// nothing answers, resolution fails open to the first candidate so page
// loads never block on an unhealthy backend; the real request then
// surfaces the failure through ordinary error handling.

use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::deployment::{DeploymentConfig, LOCAL_DEFAULT_BASE};
use crate::error::Error;
use crate::transport::TransportConfig;

const API_SUFFIX: &str = "/api";
const HEALTH_PATH: &str = "/health";

// ── Candidates ──────────────────────────────────────────────────────

/// Ordered, non-empty list of base URLs to try.
///
/// Always ends with the two local development URLs (`/api` variant
/// first), so the last element is [`LOCAL_DEFAULT_BASE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateEndpoints(Vec<String>);

impl CandidateEndpoints {
    /// Derive the candidate list for a deployment.
    ///
    /// Gateways already terminate at the API root, so their base goes
    /// first unmodified; local backends serve the API under `/api`.
    pub fn build(deployment: &DeploymentConfig) -> Self {
        let base = deployment.base_url.trim_end_matches('/');
        let with_api = format!("{base}{API_SUFFIX}");

        let preferred = if deployment.is_managed_gateway {
            [base.to_owned(), with_api, base.to_owned()]
        } else {
            [with_api, base.to_owned(), base.to_owned()]
        };

        let locals = [format!("{LOCAL_DEFAULT_BASE}{API_SUFFIX}"), LOCAL_DEFAULT_BASE.to_owned()];

        let mut urls: Vec<String> = Vec::with_capacity(preferred.len() + locals.len());
        for url in preferred {
            if !urls.contains(&url) && !locals.contains(&url) {
                urls.push(url);
            }
        }
        urls.extend(locals);

        Self(urls)
    }

    /// Use an explicit list. Empty input falls back to the local defaults.
    pub fn from_urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let urls: Vec<String> = urls
            .into_iter()
            .map(|u| u.into().trim_end_matches('/').to_owned())
            .collect();
        if urls.is_empty() {
            return Self::build(&DeploymentConfig::local());
        }
        Self(urls)
    }

    /// The most likely-correct guess, used when nothing answers.
    pub fn first(&self) -> &str {
        // Invariant: never empty.
        self.0.first().map_or(LOCAL_DEFAULT_BASE, String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

// ── Probing ─────────────────────────────────────────────────────────

/// Reachability check for one candidate base URL.
///
/// Implementations must never fail: any problem is reported as `false`.
pub trait LivenessProbe: Send + Sync {
    fn probe<'a>(&'a self, base_url: &'a str) -> BoxFuture<'a, bool>;
}

/// HEAD `{base}/health` with a hard deadline.
///
/// 2xx means healthy; 404 means the server is up but has no health
/// route, which is still good enough to route traffic to it.
pub struct HttpProbe {
    http: reqwest::Client,
    timeout: Duration,
}

impl HttpProbe {
    pub fn new(transport: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            http: transport.build_probe_client()?,
            timeout: transport.probe_timeout,
        })
    }

    /// Wrap an existing client (tests, shared connection pools).
    pub fn with_client(http: reqwest::Client, timeout: Duration) -> Self {
        Self { http, timeout }
    }

    async fn check(&self, base_url: &str) -> bool {
        let url = format!("{}{HEALTH_PATH}", base_url.trim_end_matches('/'));
        debug!("HEAD {url}");

        // Dropping the request future on deadline aborts the request.
        match tokio::time::timeout(self.timeout, self.http.head(&url).send()).await {
            Ok(Ok(resp)) => {
                let status = resp.status();
                let alive = status.is_success() || status == reqwest::StatusCode::NOT_FOUND;
                debug!(%url, %status, alive, "probe answered");
                alive
            }
            Ok(Err(e)) => {
                debug!(%url, error = %e, "probe failed");
                false
            }
            Err(_) => {
                debug!(%url, timeout_ms = self.timeout.as_millis(), "probe timed out");
                false
            }
        }
    }
}

impl LivenessProbe for HttpProbe {
    fn probe<'a>(&'a self, base_url: &'a str) -> BoxFuture<'a, bool> {
        self.check(base_url).boxed()
    }
}

// ── Resolver ────────────────────────────────────────────────────────

/// Outcome of a probe round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A candidate answered its liveness probe.
    Reachable(String),
    /// Nothing answered; this is the first candidate, used unverified.
    Unverified(String),
}

impl Resolution {
    pub fn url(&self) -> &str {
        match self {
            Self::Reachable(url) | Self::Unverified(url) => url,
        }
    }

    pub fn into_url(self) -> String {
        match self {
            Self::Reachable(url) | Self::Unverified(url) => url,
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, Self::Reachable(_))
    }
}

/// Lazily resolves and caches the working endpoint.
///
/// The cache lives for the resolver's lifetime and is only dropped by
/// [`invalidate`](Self::invalidate). Concurrent first callers wait on
/// one probe round instead of each running their own.
pub struct EndpointResolver {
    candidates: CandidateEndpoints,
    probe: Arc<dyn LivenessProbe>,
    working: Mutex<Option<Resolution>>,
}

impl EndpointResolver {
    pub fn new(candidates: CandidateEndpoints, probe: Arc<dyn LivenessProbe>) -> Self {
        Self {
            candidates,
            probe,
            working: Mutex::new(None),
        }
    }

    /// Resolver over the deployment's candidates using [`HttpProbe`].
    pub fn for_deployment(
        deployment: &DeploymentConfig,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        Ok(Self::new(
            CandidateEndpoints::build(deployment),
            Arc::new(HttpProbe::new(transport)?),
        ))
    }

    pub fn candidates(&self) -> &CandidateEndpoints {
        &self.candidates
    }

    /// The working endpoint, probing on first use.
    pub async fn resolve(&self) -> String {
        self.resolve_detailed().await.into_url()
    }

    /// Like [`resolve`](Self::resolve), reporting whether the endpoint was
    /// actually verified.
    pub async fn resolve_detailed(&self) -> Resolution {
        let mut working = self.working.lock().await;
        if let Some(cached) = working.as_ref() {
            return cached.clone();
        }

        let resolution = self.probe_round().await;
        *working = Some(resolution.clone());
        resolution
    }

    /// The cached endpoint, without probing.
    pub async fn cached(&self) -> Option<Resolution> {
        self.working.lock().await.clone()
    }

    /// Forget the cached endpoint; the next resolve runs a new probe round.
    pub async fn invalidate(&self) {
        if self.working.lock().await.take().is_some() {
            debug!("working endpoint invalidated");
        }
    }

    async fn probe_round(&self) -> Resolution {
        for url in self.candidates.iter() {
            if self.probe.probe(url).await {
                info!(endpoint = url, "using API endpoint");
                return Resolution::Reachable(url.to_owned());
            }
        }

        let guess = self.candidates.first().to_owned();
        warn!(
            endpoint = %guess,
            tried = self.candidates.len(),
            "no API endpoint answered its health probe, using first candidate unverified"
        );
        Resolution::Unverified(guess)
    }
}
