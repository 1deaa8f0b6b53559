// Payment endpoints
//
// Statistics and the recent-payments feed moved from `/payments/*` to
// `/admin/payments/*` at some point; both are still in the wild, so those
// two reads go through the dual-route fallback.

use serde_json::json;
use tracing::debug;

use campus_api::RequestContext;

use crate::campus::Campus;
use crate::error::CoreError;
use crate::model::{Page, Payment, PaymentStats};
use crate::query::ListQuery;

impl Campus {
    pub async fn list_payments(&self, query: &ListQuery) -> Result<Page<Payment>, CoreError> {
        self.fetch_page(RequestContext::get("/payments"), query, "payments").await
    }

    pub async fn get_payment(&self, id: &str) -> Result<Payment, CoreError> {
        self.fetch(RequestContext::get("/payments").segment(id), &["payment"])
            .await
    }

    /// `GET /admin/payments/stats`, falling back to `GET /payments/stats`.
    pub async fn payment_stats(&self, period: Option<&str>) -> Result<PaymentStats, CoreError> {
        let query = period
            .map(|p| vec![("period".to_owned(), p.to_owned())])
            .unwrap_or_default();
        self.fetch_dual("/admin/payments/stats", "/payments/stats", query, &["stats"])
            .await
    }

    /// `GET /admin/payments/recent?limit=`, falling back to
    /// `GET /payments/recent?limit=`.
    pub async fn recent_payments(&self, limit: u32) -> Result<Vec<Payment>, CoreError> {
        let query = vec![("limit".to_owned(), limit.to_string())];
        self.fetch_dual(
            "/admin/payments/recent",
            "/payments/recent",
            query,
            &["payments"],
        )
        .await
    }

    /// `POST /payments/{id}/refund`
    pub async fn refund_payment(&self, id: &str, reason: Option<&str>) -> Result<Payment, CoreError> {
        debug!(id, "refunding payment");
        let ctx = RequestContext::post("/payments")
            .segment(id)
            .segment("refund")
            .json(&json!({ "reason": reason }))?;
        self.fetch(ctx, &["payment"]).await
    }
}
