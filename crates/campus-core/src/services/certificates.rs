// Certificate endpoints

use serde_json::json;
use tracing::debug;

use campus_api::RequestContext;

use crate::campus::Campus;
use crate::error::CoreError;
use crate::model::{Certificate, CertificateVerification, IssueCertificateRequest, Page};
use crate::query::ListQuery;

impl Campus {
    pub async fn list_certificates(
        &self,
        query: &ListQuery,
    ) -> Result<Page<Certificate>, CoreError> {
        self.fetch_page(RequestContext::get("/certificates"), query, "certificates")
            .await
    }

    pub async fn get_certificate(&self, id: &str) -> Result<Certificate, CoreError> {
        self.fetch(
            RequestContext::get("/certificates").segment(id),
            &["certificate"],
        )
        .await
    }

    /// `POST /certificates`
    pub async fn issue_certificate(
        &self,
        req: &IssueCertificateRequest,
    ) -> Result<Certificate, CoreError> {
        debug!(user = %req.user_id, course = %req.course_id, "issuing certificate");
        let ctx = RequestContext::post("/certificates").json(req)?;
        self.fetch(ctx, &["certificate"]).await
    }

    /// `PATCH /certificates/{id}/revoke`
    pub async fn revoke_certificate(
        &self,
        id: &str,
        reason: Option<&str>,
    ) -> Result<Option<String>, CoreError> {
        debug!(id, "revoking certificate");
        let ctx = RequestContext::patch("/certificates")
            .segment(id)
            .segment("revoke")
            .json(&json!({ "reason": reason }))?;
        self.send(ctx).await
    }

    /// Check a certificate by its public code.
    ///
    /// `GET /certificates/verify/{code}`
    pub async fn verify_certificate(&self, code: &str) -> Result<CertificateVerification, CoreError> {
        self.fetch(
            RequestContext::get("/certificates/verify").segment(code),
            &[],
        )
        .await
    }
}
