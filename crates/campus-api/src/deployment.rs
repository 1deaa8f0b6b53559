// Deployment topology detection.
//
// The same client runs against a local backend (`http://host:port`, API
// under `/api`) and against managed cloud gateways whose URL already
// terminates at the API root. Which one we face is decided once, from
// the configured base URL alone.

use url::Url;

/// Base URL used when no runtime configuration supplies one.
pub const LOCAL_DEFAULT_BASE: &str = "http://localhost:5000";

/// Host fragments that identify a managed API gateway.
pub const DEFAULT_GATEWAY_PATTERNS: &[&str] = &[
    "execute-api",
    "azure-api.net",
    "apigateway",
    "api-gateway",
    "gateway.",
];

/// Immutable deployment facts derived at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentConfig {
    /// Configured base URL, trailing slashes stripped.
    pub base_url: String,
    /// Whether `base_url` points at a managed gateway.
    pub is_managed_gateway: bool,
}

impl DeploymentConfig {
    /// Derive the deployment from an optional configured URL, matching
    /// its host against [`DEFAULT_GATEWAY_PATTERNS`].
    pub fn detect(base_url: Option<&str>) -> Self {
        Self::detect_with_patterns(base_url, DEFAULT_GATEWAY_PATTERNS)
    }

    /// Like [`detect`](Self::detect), with caller-supplied host patterns.
    pub fn detect_with_patterns<S: AsRef<str>>(base_url: Option<&str>, patterns: &[S]) -> Self {
        let base_url = base_url
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(LOCAL_DEFAULT_BASE)
            .trim_end_matches('/')
            .to_owned();
        let is_managed_gateway = is_gateway_host(&base_url, patterns);
        Self {
            base_url,
            is_managed_gateway,
        }
    }

    /// The local development default.
    pub fn local() -> Self {
        Self::detect(None)
    }
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self::local()
    }
}

fn is_gateway_host<S: AsRef<str>>(base_url: &str, patterns: &[S]) -> bool {
    // Unparseable URLs fall back to matching the raw string.
    let host = Url::parse(base_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
        .unwrap_or_else(|| base_url.to_ascii_lowercase());

    patterns
        .iter()
        .map(|p| p.as_ref().to_ascii_lowercase())
        .any(|p| !p.is_empty() && host.contains(&p))
}
