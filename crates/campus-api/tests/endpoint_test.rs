#![allow(clippy::unwrap_used)]
// Endpoint resolution tests: a simulated backend for ordering and caching,
// wiremock for the real HTTP probe.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use campus_api::{CandidateEndpoints, EndpointResolver, HttpProbe, LivenessProbe, Resolution};

// ── Helpers ─────────────────────────────────────────────────────────

/// Answers only for the URLs in `live`, counting every probe.
struct SimulatedBackend {
    live: HashSet<String>,
    probes: AtomicUsize,
}

impl SimulatedBackend {
    fn answering_on(live: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            live: live.iter().map(|s| (*s).to_owned()).collect(),
            probes: AtomicUsize::new(0),
        })
    }

    fn probes(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }
}

impl LivenessProbe for SimulatedBackend {
    fn probe<'a>(&'a self, base_url: &'a str) -> BoxFuture<'a, bool> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        let alive = self.live.contains(base_url);
        async move { alive }.boxed()
    }
}

const CANDIDATES: [&str; 4] = [
    "https://lms.example.com/api",
    "https://lms.example.com",
    "http://localhost:5000/api",
    "http://localhost:5000",
];

fn resolver(backend: &Arc<SimulatedBackend>) -> EndpointResolver {
    let probe: Arc<dyn LivenessProbe> = Arc::clone(backend) as Arc<dyn LivenessProbe>;
    EndpointResolver::new(CandidateEndpoints::from_urls(CANDIDATES), probe)
}

fn probe_with_timeout(timeout: Duration) -> HttpProbe {
    HttpProbe::with_client(reqwest::Client::new(), timeout)
}

// ── Resolver ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_resolves_to_the_only_answering_candidate() {
    for (n, expected) in CANDIDATES.iter().enumerate() {
        let backend = SimulatedBackend::answering_on(&[*expected]);
        let resolver = resolver(&backend);

        let resolution = resolver.resolve_detailed().await;

        assert_eq!(resolution, Resolution::Reachable((*expected).to_owned()));
        assert_eq!(backend.probes(), n + 1, "probing must stop at the first hit");
    }
}

#[tokio::test]
async fn test_earlier_candidate_wins_when_several_answer() {
    let backend = SimulatedBackend::answering_on(&[CANDIDATES[3], CANDIDATES[1]]);
    assert_eq!(resolver(&backend).resolve().await, CANDIDATES[1]);
}

#[tokio::test]
async fn test_fails_open_to_first_candidate() {
    let backend = SimulatedBackend::answering_on(&[]);
    let resolver = resolver(&backend);

    let resolution = resolver.resolve_detailed().await;

    assert_eq!(resolution, Resolution::Unverified(CANDIDATES[0].to_owned()));
    assert!(!resolution.is_reachable());
    assert_eq!(backend.probes(), CANDIDATES.len());
}

#[tokio::test]
async fn test_second_resolve_uses_cache() {
    let backend = SimulatedBackend::answering_on(&[CANDIDATES[2]]);
    let resolver = resolver(&backend);

    let first = resolver.resolve().await;
    let second = resolver.resolve().await;

    assert_eq!(first, second);
    assert_eq!(backend.probes(), 3, "no second probe round without invalidation");
}

#[tokio::test]
async fn test_fail_open_result_is_cached_too() {
    let backend = SimulatedBackend::answering_on(&[]);
    let resolver = resolver(&backend);

    resolver.resolve().await;
    resolver.resolve().await;

    assert_eq!(backend.probes(), CANDIDATES.len());
}

#[tokio::test]
async fn test_invalidate_forces_a_new_probe_round() {
    let backend = SimulatedBackend::answering_on(&[CANDIDATES[0]]);
    let resolver = resolver(&backend);

    resolver.resolve().await;
    assert!(resolver.cached().await.is_some());

    resolver.invalidate().await;
    assert!(resolver.cached().await.is_none());

    resolver.resolve().await;
    assert_eq!(backend.probes(), 2);
}

#[tokio::test]
async fn test_concurrent_first_callers_share_one_round() {
    let backend = SimulatedBackend::answering_on(&[CANDIDATES[1]]);
    let resolver = resolver(&backend);

    let (a, b) = tokio::join!(resolver.resolve(), resolver.resolve());

    assert_eq!(a, b);
    assert_eq!(backend.probes(), 2);
}

// ── HTTP probe ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_probe_accepts_success() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let probe = probe_with_timeout(Duration::from_secs(5));
    assert!(probe.probe(&format!("{}/api", server.uri())).await);
}

#[tokio::test]
async fn test_probe_treats_not_found_as_reachable() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let probe = probe_with_timeout(Duration::from_secs(5));
    assert!(probe.probe(&server.uri()).await);
}

#[tokio::test]
async fn test_probe_rejects_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let probe = probe_with_timeout(Duration::from_secs(5));
    assert!(!probe.probe(&server.uri()).await);
}

#[tokio::test]
async fn test_probe_swallows_connection_failures() {
    let probe = probe_with_timeout(Duration::from_secs(5));
    assert!(!probe.probe("http://127.0.0.1:1").await);
}

#[tokio::test]
async fn test_probe_honors_deadline() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let probe = probe_with_timeout(Duration::from_millis(200));
    let started = std::time::Instant::now();

    assert!(!probe.probe(&server.uri()).await);
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_resolver_skips_dead_host_with_real_probe() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let live = format!("{}/api", server.uri());
    let resolver = EndpointResolver::new(
        CandidateEndpoints::from_urls(["http://127.0.0.1:1/api".to_owned(), live.clone()]),
        Arc::new(probe_with_timeout(Duration::from_secs(2))),
    );

    assert_eq!(resolver.resolve_detailed().await, Resolution::Reachable(live));
}
