// Discussion forum endpoints
//
// Moderation only: the console lists, creates and removes forums, and
// removes individual posts. Posting is a learner-side feature.

use tracing::debug;

use campus_api::RequestContext;

use crate::campus::Campus;
use crate::error::CoreError;
use crate::model::{Forum, ForumDraft, ForumPost, Page};
use crate::query::ListQuery;

impl Campus {
    pub async fn list_forums(&self, query: &ListQuery) -> Result<Page<Forum>, CoreError> {
        self.fetch_page(RequestContext::get("/forums"), query, "forums").await
    }

    pub async fn get_forum(&self, id: &str) -> Result<Forum, CoreError> {
        self.fetch(RequestContext::get("/forums").segment(id), &["forum"])
            .await
    }

    pub async fn create_forum(&self, draft: &ForumDraft) -> Result<Forum, CoreError> {
        debug!(title = %draft.title, "creating forum");
        let ctx = RequestContext::post("/forums").json(draft)?;
        self.fetch(ctx, &["forum"]).await
    }

    pub async fn delete_forum(&self, id: &str) -> Result<Option<String>, CoreError> {
        debug!(id, "deleting forum");
        self.send(RequestContext::delete("/forums").segment(id))
            .await
    }

    /// `GET /forums/{id}/posts`
    pub async fn forum_posts(
        &self,
        forum_id: &str,
        query: &ListQuery,
    ) -> Result<Page<ForumPost>, CoreError> {
        let ctx = RequestContext::get("/forums")
            .segment(forum_id)
            .segment("posts");
        self.fetch_page(ctx, query, "posts").await
    }

    /// `DELETE /forums/{forum_id}/posts/{post_id}`
    pub async fn delete_forum_post(
        &self,
        forum_id: &str,
        post_id: &str,
    ) -> Result<Option<String>, CoreError> {
        debug!(forum_id, post_id, "deleting forum post");
        let ctx = RequestContext::delete("/forums")
            .segment(forum_id)
            .segment("posts")
            .segment(post_id);
        self.send(ctx).await
    }
}
