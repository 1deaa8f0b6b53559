use thiserror::Error;

use crate::credentials::CredentialScope;
use crate::storage::StorageError;

/// Top-level error type for the `campus-api` crate.
///
/// Covers every failure mode of the dispatch layer: transport, timeouts,
/// authorization, non-2xx statuses, unsuccessful envelopes, and session
/// storage. `campus-core` maps these into user-facing errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request exceeded the client's fixed timeout.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Authorization ───────────────────────────────────────────────
    /// HTTP 401. The stored session for `scope` has already been purged
    /// by the time the caller sees this.
    #[error("{message}")]
    Unauthorized {
        message: String,
        scope: Option<CredentialScope>,
    },

    // ── Server responses ────────────────────────────────────────────
    /// Any other non-2xx status, with the server's JSON payload when present.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        payload: Option<serde_json::Value>,
    },

    /// A 2xx response whose envelope carried `success: false`.
    #[error("{message}")]
    Rejected { message: String },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Session storage ─────────────────────────────────────────────
    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),
}

impl Error {
    /// Returns `true` for HTTP 401 responses.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Returns `true` if this is a transient error worth surfacing as
    /// "backend unreachable" rather than a logical failure.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }

    /// HTTP status code, when the error came from a server response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
