// Platform settings

use campus_api::RequestContext;

use crate::campus::Campus;
use crate::error::CoreError;
use crate::model::Settings;

impl Campus {
    /// `GET /admin/settings`
    pub async fn get_settings(&self) -> Result<Settings, CoreError> {
        self.fetch(RequestContext::get("/admin/settings"), &["settings"])
            .await
    }

    /// `PUT /admin/settings`. Keys not present in `settings` are left as
    /// they are on the server.
    pub async fn update_settings(&self, settings: &Settings) -> Result<Settings, CoreError> {
        let ctx = RequestContext::put("/admin/settings").json(settings)?;
        self.fetch(ctx, &["settings"]).await
    }
}
