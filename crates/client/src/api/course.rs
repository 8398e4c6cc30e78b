//! Course API module

use std::sync::Arc;

use campus_domain::{Course, CourseUpdate, ListQuery, NewCourse, Page, Result};

use super::{ensure_not_blank, ensure_positive_id};
use crate::datasource::CourseStore;
use crate::http::ProgressSink;

/// Facade operations for the course catalogue
#[derive(Clone)]
pub struct CourseApi {
    store: Arc<dyn CourseStore>,
}

impl CourseApi {
    pub fn new(store: Arc<dyn CourseStore>) -> Self {
        Self { store }
    }

    /// List courses with search, sort and pagination
    pub async fn list(&self, query: &ListQuery) -> Result<Page<Course>> {
        self.store.list(query).await
    }

    /// Fetch one course by id
    pub async fn get(&self, id: i64) -> Result<Course> {
        ensure_positive_id("Get Course", "id", id)?;
        self.store.get(id).await
    }

    /// Create a course; multipart upload when an image is attached.
    ///
    /// Required fields are checked locally first, so a bad draft costs no
    /// round trip.
    pub async fn create(&self, draft: NewCourse) -> Result<Course> {
        self.validate_draft(&draft)?;
        self.store.create(draft, None).await
    }

    /// Create a course, reporting image upload progress
    pub async fn create_with_progress(
        &self,
        draft: NewCourse,
        progress: ProgressSink,
    ) -> Result<Course> {
        self.validate_draft(&draft)?;
        self.store.create(draft, Some(progress)).await
    }

    pub async fn update(&self, id: i64, patch: CourseUpdate) -> Result<Course> {
        ensure_positive_id("Update Course", "id", id)?;
        self.store.update(id, patch).await
    }

    /// Delete a course. No idempotency handling here; repeated online
    /// deletes depend entirely on server behavior.
    pub async fn delete(&self, id: i64) -> Result<()> {
        ensure_positive_id("Delete Course", "id", id)?;
        self.store.delete(id).await
    }

    /// Distinct category names across the catalogue
    pub async fn categories(&self) -> Result<Vec<String>> {
        self.store.categories().await
    }

    fn validate_draft(&self, draft: &NewCourse) -> Result<()> {
        let context = "Create Course";
        ensure_not_blank(context, "title", &draft.title)?;
        ensure_not_blank(context, "instructor", &draft.instructor)?;
        if let Some(image) = &draft.image {
            if image.is_empty() {
                return Err(campus_domain::ApiError::validation(
                    context,
                    "image file must not be empty",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use campus_domain::{ApiError, ErrorKind, FileUpload};

    use super::*;
    use crate::api::tests_support::CountingStore;

    #[tokio::test]
    async fn test_invalid_ids_reject_without_io() {
        let store = Arc::new(CountingStore::default());
        let api = CourseApi::new(store.clone());

        for bad in [0, -1, -500] {
            assert_eq!(api.get(bad).await.unwrap_err().kind(), ErrorKind::Validation);
            assert_eq!(
                api.update(bad, CourseUpdate::default()).await.unwrap_err().kind(),
                ErrorKind::Validation
            );
            assert_eq!(api.delete(bad).await.unwrap_err().kind(), ErrorKind::Validation);
        }
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_create_requires_title_and_instructor() {
        let store = Arc::new(CountingStore::default());
        let api = CourseApi::new(store.clone());

        let err = api
            .create(NewCourse { title: "X".into(), ..Default::default() })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "Create Course: instructor must not be empty");

        let err = api
            .create(NewCourse { instructor: "Ada".into(), ..Default::default() })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Create Course: title must not be empty");

        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_image_is_rejected() {
        let store = Arc::new(CountingStore::default());
        let api = CourseApi::new(store.clone());

        let draft = NewCourse {
            title: "X".into(),
            instructor: "Ada".into(),
            image: Some(FileUpload::new("empty.png", "image/png", Vec::new())),
            ..Default::default()
        };
        let err = api.create(draft).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_valid_calls_reach_the_store() {
        let store = Arc::new(CountingStore::default());
        let api = CourseApi::new(store.clone());

        // the counting store answers everything with a sentinel error, so
        // only the call count matters here
        let err = api.get(7).await.unwrap_err();
        assert!(matches!(err, ApiError::Unknown(_)));
        assert_eq!(store.calls(), 1);
    }
}
