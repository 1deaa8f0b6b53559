// Notification endpoints

use tracing::debug;

use campus_api::RequestContext;

use crate::campus::Campus;
use crate::error::CoreError;
use crate::model::{BroadcastRequest, Notification, Page};
use crate::query::ListQuery;

impl Campus {
    pub async fn list_notifications(
        &self,
        query: &ListQuery,
    ) -> Result<Page<Notification>, CoreError> {
        self.fetch_page(RequestContext::get("/notifications"), query, "notifications")
            .await
    }

    /// `PATCH /notifications/{id}/read`
    pub async fn mark_notification_read(&self, id: &str) -> Result<Option<String>, CoreError> {
        self.send(RequestContext::patch("/notifications").segment(id).segment("read"))
            .await
    }

    /// `PATCH /notifications/read-all`
    pub async fn mark_all_notifications_read(&self) -> Result<Option<String>, CoreError> {
        self.send(RequestContext::patch("/notifications/read-all"))
            .await
    }

    pub async fn delete_notification(&self, id: &str) -> Result<Option<String>, CoreError> {
        self.send(RequestContext::delete("/notifications").segment(id))
            .await
    }

    /// Send a notification to an audience.
    ///
    /// `POST /admin/notifications/broadcast`
    pub async fn broadcast_notification(
        &self,
        req: &BroadcastRequest,
    ) -> Result<Option<String>, CoreError> {
        debug!(title = %req.title, audience = ?req.audience, "broadcasting notification");
        let ctx = RequestContext::post("/admin/notifications/broadcast").json(req)?;
        self.send(ctx).await
    }
}
