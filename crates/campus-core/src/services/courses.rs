// Course endpoints

use serde_json::json;
use tracing::debug;

use campus_api::RequestContext;

use crate::campus::Campus;
use crate::error::CoreError;
use crate::model::{Course, CourseDraft, Enrollment, Page};
use crate::query::ListQuery;

impl Campus {
    /// `GET /courses?page=&limit=&...`
    pub async fn list_courses(&self, query: &ListQuery) -> Result<Page<Course>, CoreError> {
        self.fetch_page(RequestContext::get("/courses"), query, "courses").await
    }

    /// `GET /courses/{id}`
    pub async fn get_course(&self, id: &str) -> Result<Course, CoreError> {
        self.fetch(RequestContext::get("/courses").segment(id), &["course"])
            .await
    }

    /// `POST /courses`
    pub async fn create_course(&self, draft: &CourseDraft) -> Result<Course, CoreError> {
        debug!(title = ?draft.title, "creating course");
        let ctx = RequestContext::post("/courses").json(draft)?;
        self.fetch(ctx, &["course"]).await
    }

    /// `PUT /courses/{id}` with only the fields set in `draft`.
    pub async fn update_course(&self, id: &str, draft: &CourseDraft) -> Result<Course, CoreError> {
        debug!(id, "updating course");
        let ctx = RequestContext::put("/courses").segment(id).json(draft)?;
        self.fetch(ctx, &["course"]).await
    }

    /// `DELETE /courses/{id}`
    pub async fn delete_course(&self, id: &str) -> Result<Option<String>, CoreError> {
        debug!(id, "deleting course");
        self.send(RequestContext::delete("/courses").segment(id))
            .await
    }

    /// Publish or unpublish a course.
    ///
    /// `PATCH /courses/{id}/publish` with `{"isPublished": bool}`
    pub async fn set_course_published(
        &self,
        id: &str,
        published: bool,
    ) -> Result<Course, CoreError> {
        debug!(id, published, "toggling course visibility");
        let ctx = RequestContext::patch("/courses")
            .segment(id)
            .segment("publish")
            .json(&json!({ "isPublished": published }))?;
        self.fetch(ctx, &["course"]).await
    }

    /// `GET /courses/{id}/enrollments`
    pub async fn course_enrollments(
        &self,
        id: &str,
        query: &ListQuery,
    ) -> Result<Page<Enrollment>, CoreError> {
        let ctx = RequestContext::get("/courses")
            .segment(id)
            .segment("enrollments");
        self.fetch_page(ctx, query, "enrollments").await
    }
}
