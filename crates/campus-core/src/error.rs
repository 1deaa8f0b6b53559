// ── Core error types ──
//
// User-facing errors from campus-core. Callers see one human-readable
// message per failure; HTTP details stay in `campus_api::Error`. The
// `From<campus_api::Error>` impl does the translation.

use thiserror::Error;

use campus_api::StorageError;

/// Unified error type for the facade.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connectivity ─────────────────────────────────────────────────
    #[error("Cannot reach the Campus API at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("The Campus API did not answer within {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Authorization ────────────────────────────────────────────────
    /// The server answered 401; the local session is already cleared.
    #[error("{message}")]
    SessionExpired { message: String },

    #[error("{message}")]
    PermissionDenied { message: String },

    // ── Server responses ─────────────────────────────────────────────
    #[error("{message}")]
    NotFound { message: String },

    /// `success: false` envelope.
    #[error("{message}")]
    Rejected { message: String },

    #[error("{message}")]
    Api { message: String, status: Option<u16> },

    // ── Local ────────────────────────────────────────────────────────
    #[error("Session storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Whether the user has to sign in again.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<campus_api::Error> for CoreError {
    fn from(err: campus_api::Error) -> Self {
        use campus_api::Error as Api;

        match err {
            Api::Transport(e) => Self::ConnectionFailed {
                url: e.url().map(ToString::to_string).unwrap_or_default(),
                reason: e.to_string(),
            },
            Api::InvalidUrl(e) => Self::ConnectionFailed {
                url: String::new(),
                reason: e.to_string(),
            },
            Api::Tls(reason) => Self::ConnectionFailed {
                url: String::new(),
                reason,
            },
            Api::Timeout { timeout_secs } => Self::Timeout { timeout_secs },
            Api::Unauthorized { message, .. } => Self::SessionExpired { message },
            Api::Api {
                status: 403,
                message,
                ..
            } => Self::PermissionDenied { message },
            Api::Api {
                status: 404,
                message,
                ..
            } => Self::NotFound { message },
            Api::Api {
                status, message, ..
            } => Self::Api {
                message,
                status: Some(status),
            },
            Api::Rejected { message } => Self::Rejected { message },
            Api::Deserialization { message, .. } => {
                Self::Internal(format!("unexpected response from server: {message}"))
            }
            Api::Storage(e) => e.into(),
        }
    }
}

impl From<StorageError> for CoreError {
    fn from(err: StorageError) -> Self {
        Self::Storage {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_user_facing_variants() {
        let forbidden: CoreError = campus_api::Error::Api {
            status: 403,
            message: "Admins only".into(),
            payload: None,
        }
        .into();
        assert!(matches!(forbidden, CoreError::PermissionDenied { .. }));
        assert_eq!(forbidden.to_string(), "Admins only");

        let missing: CoreError = campus_api::Error::Api {
            status: 404,
            message: "Course not found".into(),
            payload: None,
        }
        .into();
        assert!(matches!(missing, CoreError::NotFound { .. }));

        let other: CoreError = campus_api::Error::Api {
            status: 422,
            message: "Invalid price".into(),
            payload: None,
        }
        .into();
        assert!(matches!(other, CoreError::Api { status: Some(422), .. }));
    }

    #[test]
    fn unauthorized_becomes_session_expired() {
        let err: CoreError = campus_api::Error::Unauthorized {
            message: "jwt expired".into(),
            scope: None,
        }
        .into();
        assert!(err.is_session_expired());
        assert_eq!(err.to_string(), "jwt expired");
    }
}
