//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use campus_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the Campus API at {url}")]
    #[diagnostic(
        code(campus::connection_failed),
        help(
            "Check that the backend is running and the URL is right.\n\
             Run: campus endpoint   to see which addresses were tried.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(campus::timeout),
        help("Increase the timeout with --timeout or check the backend's health.")
    )]
    Timeout { seconds: u64 },

    // ── Authorization ────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(campus::session_expired),
        help("Your session was cleared. Sign in again with: campus login (or campus admin-login)")
    )]
    SessionExpired { message: String },

    #[error("Not signed in")]
    #[diagnostic(
        code(campus::not_signed_in),
        help("Run: campus {login_command}")
    )]
    NotSignedIn { login_command: String },

    #[error("{message}")]
    #[diagnostic(
        code(campus::permission_denied),
        help("This action needs an administrator session. Run: campus admin-login")
    )]
    PermissionDenied { message: String },

    // ── Server responses ─────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(campus::not_found))]
    NotFound { message: String },

    #[error("{message}")]
    #[diagnostic(code(campus::rejected))]
    Rejected { message: String },

    #[error("{message}")]
    #[diagnostic(code(campus::api_error))]
    Api {
        message: String,
        status: Option<u16>,
    },

    // ── Local ────────────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(campus::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(
        code(campus::config),
        help("Check the config file (see `campus --help` for --config) and CAMPUS_* variables.")
    )]
    Config(#[from] campus_config::ConfigError),

    #[error("Session storage error: {message}")]
    #[diagnostic(code(campus::storage), help("Check permissions on the session file."))]
    Storage { message: String },

    #[error("Internal error: {0}")]
    #[diagnostic(code(campus::internal))]
    Internal(String),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    #[diagnostic(code(campus::json))]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    #[diagnostic(code(campus::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::SessionExpired { .. } | Self::NotSignedIn { .. } => exit_code::AUTH,
            Self::PermissionDenied { .. } => exit_code::PERMISSION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::Config(_) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::Timeout { timeout_secs } => Self::Timeout {
                seconds: timeout_secs,
            },
            CoreError::SessionExpired { message } => Self::SessionExpired { message },
            CoreError::PermissionDenied { message } => Self::PermissionDenied { message },
            CoreError::NotFound { message } => Self::NotFound { message },
            CoreError::Rejected { message } => Self::Rejected { message },
            CoreError::Api { message, status } => Self::Api { message, status },
            CoreError::Storage { message } => Self::Storage { message },
            CoreError::Internal(message) => Self::Internal(message),
        }
    }
}
