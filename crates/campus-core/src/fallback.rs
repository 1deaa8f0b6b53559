// ── Dual-route fallback ──
//
// Some reads exist under two route names (`/admin/payments/stats` and
// `/payments/stats`) depending on backend version. The primary is tried
// first; whatever goes wrong with it, the alternate is tried exactly once
// and its outcome is final.

use std::future::Future;

use tracing::debug;

use crate::error::CoreError;

/// Await `primary`; on failure build and await `fallback` once.
///
/// The fallback is not constructed at all when the primary succeeds.
pub async fn with_fallback<T, P, F, Fut>(primary: P, fallback: F) -> Result<T, CoreError>
where
    P: Future<Output = Result<T, CoreError>>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, CoreError>>,
{
    match primary.await {
        Ok(value) => Ok(value),
        Err(err) => {
            debug!(error = %err, "primary route failed, trying alternate");
            fallback().await
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn fail(message: &str) -> Result<u32, CoreError> {
        Err(CoreError::Api {
            message: message.into(),
            status: Some(404),
        })
    }

    #[tokio::test]
    async fn primary_success_skips_fallback() {
        let calls = AtomicUsize::new(0);
        let out = with_fallback(async { Ok::<u32, CoreError>(1) }, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(2) }
        })
        .await
        .unwrap();

        assert_eq!(out, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failure_retries_once_and_returns_fallback_value() {
        let calls = AtomicUsize::new(0);
        let out = with_fallback(async { fail("no route") }, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(2) }
        })
        .await
        .unwrap();

        assert_eq!(out, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn both_failing_surfaces_fallback_error() {
        let err = with_fallback(async { fail("primary") }, || async { fail("alternate") })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "alternate");
    }
}
