//! Course video API module

use std::sync::Arc;

use campus_domain::{ApiError, CourseVideo, ListQuery, NewVideo, Page, Result, VideoUpdate};

use super::{ensure_not_blank, ensure_positive_id};
use crate::datasource::VideoStore;
use crate::http::ProgressSink;

/// Facade operations for videos attached to courses
#[derive(Clone)]
pub struct VideoApi {
    store: Arc<dyn VideoStore>,
}

impl VideoApi {
    pub fn new(store: Arc<dyn VideoStore>) -> Self {
        Self { store }
    }

    /// List the videos of one course
    pub async fn list_for_course(
        &self,
        course_id: i64,
        query: &ListQuery,
    ) -> Result<Page<CourseVideo>> {
        ensure_positive_id("List Videos", "course id", course_id)?;
        self.store.list_for_course(course_id, query).await
    }

    pub async fn get(&self, id: i64) -> Result<CourseVideo> {
        ensure_positive_id("Get Video", "id", id)?;
        self.store.get(id).await
    }

    /// Upload a video; always a multipart submission
    pub async fn upload(&self, draft: NewVideo) -> Result<CourseVideo> {
        self.validate_draft(&draft)?;
        self.store.upload(draft, None).await
    }

    /// Upload a video with percentage progress callbacks
    pub async fn upload_with_progress(
        &self,
        draft: NewVideo,
        progress: ProgressSink,
    ) -> Result<CourseVideo> {
        self.validate_draft(&draft)?;
        self.store.upload(draft, Some(progress)).await
    }

    pub async fn update(&self, id: i64, patch: VideoUpdate) -> Result<CourseVideo> {
        ensure_positive_id("Update Video", "id", id)?;
        self.store.update(id, patch).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        ensure_positive_id("Delete Video", "id", id)?;
        self.store.delete(id).await
    }

    fn validate_draft(&self, draft: &NewVideo) -> Result<()> {
        let context = "Upload Video";
        ensure_positive_id(context, "course id", draft.course_id)?;
        ensure_not_blank(context, "title", &draft.title)?;
        if draft.file.is_empty() {
            return Err(ApiError::validation(context, "video file must not be empty"));
        }
        Ok(())
    }
}
