// Admin console endpoints

use serde_json::json;
use tracing::debug;

use campus_api::RequestContext;

use crate::campus::Campus;
use crate::error::CoreError;
use crate::model::{DashboardStats, Page, User, UserStatus};
use crate::query::ListQuery;

impl Campus {
    /// `GET /admin/dashboard/stats`, falling back to `GET /dashboard/stats`.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, CoreError> {
        self.fetch_dual(
            "/admin/dashboard/stats",
            "/dashboard/stats",
            Vec::new(),
            &["stats"],
        )
        .await
    }

    /// `GET /admin/users?page=&limit=&role=&status=&search=`
    pub async fn list_users(&self, query: &ListQuery) -> Result<Page<User>, CoreError> {
        self.fetch_page(RequestContext::get("/admin/users"), query, "users").await
    }

    /// `PATCH /admin/users/{id}/status`
    pub async fn update_user_status(&self, id: &str, status: UserStatus) -> Result<User, CoreError> {
        debug!(id, %status, "updating user status");
        let ctx = RequestContext::patch("/admin/users")
            .segment(id)
            .segment("status")
            .json(&json!({ "status": status }))?;
        self.fetch(ctx, &["user"]).await
    }
}
