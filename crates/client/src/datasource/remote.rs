//! HTTP-backed data source
//!
//! Implements every store trait over [`HttpClient`]. All failures are
//! normalized here with a `"<Verb> <Resource>"` context before they cross
//! the trait boundary, so the facade modules above never see raw
//! transport errors.

use async_trait::async_trait;
use campus_domain::{
    ApiError, Course, CourseUpdate, CourseVideo, Enrollment, FileUpload, Group, GroupUpdate,
    ListQuery, NewCourse, NewGroup, NewRole, NewVideo, Page, Result, Role, RoleUpdate,
    VideoUpdate,
};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use super::{CourseStore, EnrollmentStore, GroupStore, RoleStore, VideoStore};
use crate::http::upload::progress_body;
use crate::http::{normalize, page_from_value, HttpClient, ProgressSink, TransportError};

/// Data source that talks to the backend API
pub struct RemoteDataSource {
    http: HttpClient,
}

impl RemoteDataSource {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// GET a collection endpoint and fold whatever shape comes back into
    /// the pagination contract. Shape mismatches are not errors.
    async fn fetch_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &ListQuery,
        context: &str,
    ) -> Result<Page<T>> {
        let params = list_params(query);
        let value = self
            .http
            .get_value(path, &params)
            .await
            .map_err(|err| normalize(err, context))?;
        Ok(page_from_value(value, query))
    }

    /// GET a single resource; a 2xx with an empty/null body is NotFound
    async fn fetch_one<T: DeserializeOwned>(&self, path: &str, context: &str) -> Result<T> {
        let value =
            self.http.get_value(path, &[]).await.map_err(|err| normalize(err, context))?;
        if value.is_null() {
            return Err(ApiError::not_found(context, "resource not found"));
        }
        decode(value, context)
    }

    async fn create_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        context: &str,
    ) -> Result<T> {
        let value =
            self.http.post_json(path, body).await.map_err(|err| normalize(err, context))?;
        decode(value, context)
    }

    async fn update_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        context: &str,
    ) -> Result<T> {
        let value =
            self.http.put_json(path, body).await.map_err(|err| normalize(err, context))?;
        decode(value, context)
    }

    async fn remove(&self, path: &str, context: &str) -> Result<()> {
        self.http.delete(path).await.map_err(|err| normalize(err, context))?;
        Ok(())
    }
}

/// Decode a 2xx body into the expected type
fn decode<T: DeserializeOwned>(value: Value, context: &str) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|err| normalize(TransportError::Decode(err.to_string()), context))
}

/// Query parameters in the exact casing the backend expects
fn list_params(query: &ListQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("PageNumber", query.effective_page_number().to_string()),
        ("PageSize", query.effective_page_size().to_string()),
    ];
    if let Some(term) = query.search_term.as_deref().filter(|term| !term.is_empty()) {
        params.push(("SearchTerm", term.to_string()));
    }
    if let Some(sort) = query.sort {
        params.push(("SortOrder", sort.as_query_value().to_string()));
    }
    params
}

/// Attach a binary part to a form.
///
/// Assembly is explicit, field by field: the file becomes a streamed
/// binary part that ticks the progress sink, everything else was already
/// added as stringified text fields.
fn file_part(
    form: Form,
    field: &str,
    file: FileUpload,
    progress: Option<ProgressSink>,
    context: &str,
) -> Result<Form> {
    let total = file.len();
    let part = Part::stream_with_length(progress_body(file.bytes, progress), total)
        .file_name(file.file_name)
        .mime_str(&file.content_type)
        .map_err(|err| normalize(TransportError::Build(err.to_string()), context))?;
    Ok(form.part(field.to_string(), part))
}

#[async_trait]
impl CourseStore for RemoteDataSource {
    async fn list(&self, query: &ListQuery) -> Result<Page<Course>> {
        self.fetch_page("/courses", query, "List Courses").await
    }

    async fn get(&self, id: i64) -> Result<Course> {
        self.fetch_one(&format!("/courses/{id}"), "Get Course").await
    }

    async fn create(&self, draft: NewCourse, progress: Option<ProgressSink>) -> Result<Course> {
        let context = "Create Course";

        // Exactly one encoding per call: multipart when a file rides
        // along, JSON otherwise.
        let created = match draft.image.clone() {
            Some(image) => {
                let form = Form::new()
                    .text("title", draft.title.clone())
                    .text("description", draft.description.clone())
                    .text("instructor", draft.instructor.clone())
                    .text("category", draft.category.clone());
                let form = file_part(form, "image", image, progress.clone(), context)?;
                let value = self
                    .http
                    .post_multipart("/courses", form)
                    .await
                    .map_err(|err| normalize(err, context))?;
                decode(value, context)?
            }
            None => self.create_json("/courses", &draft, context).await?,
        };

        if let Some(sink) = progress {
            sink.finish();
        }
        Ok(created)
    }

    async fn update(&self, id: i64, patch: CourseUpdate) -> Result<Course> {
        self.update_json(&format!("/courses/{id}"), &patch, "Update Course").await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.remove(&format!("/courses/{id}"), "Delete Course").await
    }

    async fn categories(&self) -> Result<Vec<String>> {
        let context = "List Categories";
        let value = self
            .http
            .get_value("/courses/categories", &[])
            .await
            .map_err(|err| normalize(err, context))?;
        if value.is_null() {
            return Ok(Vec::new());
        }
        decode(value, context)
    }
}

#[async_trait]
impl VideoStore for RemoteDataSource {
    async fn list_for_course(
        &self,
        course_id: i64,
        query: &ListQuery,
    ) -> Result<Page<CourseVideo>> {
        self.fetch_page(&format!("/courses/{course_id}/videos"), query, "List Videos").await
    }

    async fn get(&self, id: i64) -> Result<CourseVideo> {
        self.fetch_one(&format!("/videos/{id}"), "Get Video").await
    }

    async fn upload(
        &self,
        draft: NewVideo,
        progress: Option<ProgressSink>,
    ) -> Result<CourseVideo> {
        let context = "Upload Video";

        let form = Form::new()
            .text("courseId", draft.course_id.to_string())
            .text("title", draft.title.clone())
            .text("position", draft.position.to_string());
        let form = file_part(form, "file", draft.file, progress.clone(), context)?;

        let value = self
            .http
            .post_multipart(&format!("/courses/{}/videos", draft.course_id), form)
            .await
            .map_err(|err| normalize(err, context))?;
        let video = decode(value, context)?;

        if let Some(sink) = progress {
            sink.finish();
        }
        Ok(video)
    }

    async fn update(&self, id: i64, patch: VideoUpdate) -> Result<CourseVideo> {
        self.update_json(&format!("/videos/{id}"), &patch, "Update Video").await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.remove(&format!("/videos/{id}"), "Delete Video").await
    }
}

#[async_trait]
impl RoleStore for RemoteDataSource {
    async fn list(&self, query: &ListQuery) -> Result<Page<Role>> {
        self.fetch_page("/roles", query, "List Roles").await
    }

    async fn get(&self, id: i64) -> Result<Role> {
        self.fetch_one(&format!("/roles/{id}"), "Get Role").await
    }

    async fn create(&self, draft: NewRole) -> Result<Role> {
        self.create_json("/roles", &draft, "Create Role").await
    }

    async fn update(&self, id: i64, patch: RoleUpdate) -> Result<Role> {
        self.update_json(&format!("/roles/{id}"), &patch, "Update Role").await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.remove(&format!("/roles/{id}"), "Delete Role").await
    }
}

#[async_trait]
impl GroupStore for RemoteDataSource {
    async fn list(&self, query: &ListQuery) -> Result<Page<Group>> {
        self.fetch_page("/groups", query, "List Groups").await
    }

    async fn get(&self, id: i64) -> Result<Group> {
        self.fetch_one(&format!("/groups/{id}"), "Get Group").await
    }

    async fn create(&self, draft: NewGroup) -> Result<Group> {
        self.create_json("/groups", &draft, "Create Group").await
    }

    async fn update(&self, id: i64, patch: GroupUpdate) -> Result<Group> {
        self.update_json(&format!("/groups/{id}"), &patch, "Update Group").await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.remove(&format!("/groups/{id}"), "Delete Group").await
    }

    async fn enable_courses(&self, group_id: i64, course_ids: &[i64]) -> Result<Value> {
        self.http
            .put_json(&format!("/groups/{group_id}/courses"), &json!({ "courseIds": course_ids }))
            .await
            .map_err(|err| normalize(err, "Enable Group Courses"))
    }
}

#[async_trait]
impl EnrollmentStore for RemoteDataSource {
    async fn list_for_user(&self, user_id: i64, query: &ListQuery) -> Result<Page<Enrollment>> {
        self.fetch_page(&format!("/users/{user_id}/courses"), query, "List Enrollments").await
    }

    async fn subscribe(&self, user_id: i64, course_id: i64) -> Result<Value> {
        self.http
            .post_empty(&format!("/users/{user_id}/courses/{course_id}"))
            .await
            .map_err(|err| normalize(err, "Subscribe Course"))
    }

    async fn unsubscribe(&self, user_id: i64, course_id: i64) -> Result<Value> {
        self.http
            .delete(&format!("/users/{user_id}/courses/{course_id}"))
            .await
            .map_err(|err| normalize(err, "Unsubscribe Course"))
    }
}
