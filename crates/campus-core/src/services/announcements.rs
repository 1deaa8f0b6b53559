// Announcement endpoints

use tracing::debug;

use campus_api::RequestContext;

use crate::campus::Campus;
use crate::error::CoreError;
use crate::model::{Announcement, AnnouncementDraft, Page};
use crate::query::ListQuery;

impl Campus {
    pub async fn list_announcements(
        &self,
        query: &ListQuery,
    ) -> Result<Page<Announcement>, CoreError> {
        self.fetch_page(RequestContext::get("/announcements"), query, "announcements")
            .await
    }

    pub async fn get_announcement(&self, id: &str) -> Result<Announcement, CoreError> {
        self.fetch(
            RequestContext::get("/announcements").segment(id),
            &["announcement"],
        )
        .await
    }

    pub async fn create_announcement(
        &self,
        draft: &AnnouncementDraft,
    ) -> Result<Announcement, CoreError> {
        debug!(title = ?draft.title, "creating announcement");
        let ctx = RequestContext::post("/announcements").json(draft)?;
        self.fetch(ctx, &["announcement"]).await
    }

    pub async fn update_announcement(
        &self,
        id: &str,
        draft: &AnnouncementDraft,
    ) -> Result<Announcement, CoreError> {
        let ctx = RequestContext::put("/announcements").segment(id).json(draft)?;
        self.fetch(ctx, &["announcement"]).await
    }

    pub async fn delete_announcement(&self, id: &str) -> Result<Option<String>, CoreError> {
        debug!(id, "deleting announcement");
        self.send(RequestContext::delete("/announcements").segment(id))
            .await
    }
}
