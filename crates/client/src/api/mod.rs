//! Per-resource API modules and facade composition
//!
//! Each module validates inputs before delegating to its data source, so
//! bad input is rejected with a `Validation` error and zero I/O in both
//! execution modes. The online/offline decision is made exactly once,
//! when a [`CampusClient`] is composed.

use std::sync::Arc;
use std::time::Duration;

use campus_domain::{ApiError, ClientConfig, Result};

use crate::auth::{SessionGuard, TokenProvider};
use crate::datasource::{
    CourseStore, EnrollmentStore, FixtureDataSource, GroupStore, RemoteDataSource, RoleStore,
    VideoStore,
};
use crate::http::{normalize, HttpClient};

pub mod course;
pub mod enrollment;
pub mod group;
pub mod role;
pub mod video;

pub use course::CourseApi;
pub use enrollment::EnrollmentApi;
pub use group::GroupApi;
pub use role::RoleApi;
pub use video::VideoApi;

/// Reject non-positive ids before any I/O happens
pub(crate) fn ensure_positive_id(context: &str, name: &str, id: i64) -> Result<()> {
    if id <= 0 {
        return Err(ApiError::validation(context, format!("{name} must be a positive integer")));
    }
    Ok(())
}

/// Reject blank required fields before any I/O happens
pub(crate) fn ensure_not_blank(context: &str, name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ApiError::validation(context, format!("{name} must not be empty")));
    }
    Ok(())
}

/// The data-access facade: one API module per resource, all backed by the
/// same data source.
///
/// Construction picks the strategy: [`CampusClient::connect`] talks to the
/// backend, [`CampusClient::offline`] serves fixtures. Callers observe
/// identical shapes and error kinds either way.
#[derive(Clone)]
pub struct CampusClient {
    courses: CourseApi,
    videos: VideoApi,
    roles: RoleApi,
    groups: GroupApi,
    enrollments: EnrollmentApi,
}

impl CampusClient {
    /// Compose the facade over the remote backend
    pub fn connect(
        config: &ClientConfig,
        tokens: Arc<dyn TokenProvider>,
        session: Arc<dyn SessionGuard>,
    ) -> Result<Self> {
        let http = HttpClient::builder()
            .base_url(config.base_url.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .token_provider(tokens)
            .session_guard(session)
            .build()
            .map_err(|err| normalize(err, "Create Client"))?;
        Ok(Self::from_stores(Arc::new(RemoteDataSource::new(http))))
    }

    /// Compose the facade over the default fixture set
    pub fn offline() -> Self {
        Self::from_stores(Arc::new(FixtureDataSource::new()))
    }

    /// Compose the facade over a caller-prepared fixture source
    pub fn offline_with(fixtures: Arc<FixtureDataSource>) -> Self {
        Self::from_stores(fixtures)
    }

    /// Compose according to `config.offline`
    pub fn from_config(
        config: &ClientConfig,
        tokens: Arc<dyn TokenProvider>,
        session: Arc<dyn SessionGuard>,
    ) -> Result<Self> {
        if config.offline {
            Ok(Self::offline())
        } else {
            Self::connect(config, tokens, session)
        }
    }

    fn from_stores<S>(store: Arc<S>) -> Self
    where
        S: CourseStore + VideoStore + RoleStore + GroupStore + EnrollmentStore + 'static,
    {
        Self {
            courses: CourseApi::new(store.clone()),
            videos: VideoApi::new(store.clone()),
            roles: RoleApi::new(store.clone()),
            groups: GroupApi::new(store.clone()),
            enrollments: EnrollmentApi::new(store),
        }
    }

    pub fn courses(&self) -> &CourseApi {
        &self.courses
    }

    pub fn videos(&self) -> &VideoApi {
        &self.videos
    }

    pub fn roles(&self) -> &RoleApi {
        &self.roles
    }

    pub fn groups(&self) -> &GroupApi {
        &self.groups
    }

    pub fn enrollments(&self) -> &EnrollmentApi {
        &self.enrollments
    }
}

/// Test double shared by the module tests: counts every store call and
/// answers with a sentinel error, so validation tests can assert that bad
/// input triggers zero I/O.
#[cfg(test)]
pub(crate) mod tests_support {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use campus_domain::{
        Course, CourseUpdate, CourseVideo, Enrollment, Group, GroupUpdate, ListQuery, NewCourse,
        NewGroup, NewRole, NewVideo, Page, Result, Role, RoleUpdate, VideoUpdate,
    };
    use serde_json::Value;

    use super::*;
    use crate::http::ProgressSink;

    #[derive(Default)]
    pub(crate) struct CountingStore {
        calls: AtomicUsize,
    }

    impl CountingStore {
        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn touch<T>(&self) -> Result<T> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ApiError::Unknown("store reached".into()))
        }
    }

    #[async_trait]
    impl CourseStore for CountingStore {
        async fn list(&self, _query: &ListQuery) -> Result<Page<Course>> {
            self.touch()
        }
        async fn get(&self, _id: i64) -> Result<Course> {
            self.touch()
        }
        async fn create(
            &self,
            _draft: NewCourse,
            _progress: Option<ProgressSink>,
        ) -> Result<Course> {
            self.touch()
        }
        async fn update(&self, _id: i64, _patch: CourseUpdate) -> Result<Course> {
            self.touch()
        }
        async fn delete(&self, _id: i64) -> Result<()> {
            self.touch()
        }
        async fn categories(&self) -> Result<Vec<String>> {
            self.touch()
        }
    }

    #[async_trait]
    impl VideoStore for CountingStore {
        async fn list_for_course(
            &self,
            _course_id: i64,
            _query: &ListQuery,
        ) -> Result<Page<CourseVideo>> {
            self.touch()
        }
        async fn get(&self, _id: i64) -> Result<CourseVideo> {
            self.touch()
        }
        async fn upload(
            &self,
            _draft: NewVideo,
            _progress: Option<ProgressSink>,
        ) -> Result<CourseVideo> {
            self.touch()
        }
        async fn update(&self, _id: i64, _patch: VideoUpdate) -> Result<CourseVideo> {
            self.touch()
        }
        async fn delete(&self, _id: i64) -> Result<()> {
            self.touch()
        }
    }

    #[async_trait]
    impl RoleStore for CountingStore {
        async fn list(&self, _query: &ListQuery) -> Result<Page<Role>> {
            self.touch()
        }
        async fn get(&self, _id: i64) -> Result<Role> {
            self.touch()
        }
        async fn create(&self, _draft: NewRole) -> Result<Role> {
            self.touch()
        }
        async fn update(&self, _id: i64, _patch: RoleUpdate) -> Result<Role> {
            self.touch()
        }
        async fn delete(&self, _id: i64) -> Result<()> {
            self.touch()
        }
    }

    #[async_trait]
    impl GroupStore for CountingStore {
        async fn list(&self, _query: &ListQuery) -> Result<Page<Group>> {
            self.touch()
        }
        async fn get(&self, _id: i64) -> Result<Group> {
            self.touch()
        }
        async fn create(&self, _draft: NewGroup) -> Result<Group> {
            self.touch()
        }
        async fn update(&self, _id: i64, _patch: GroupUpdate) -> Result<Group> {
            self.touch()
        }
        async fn delete(&self, _id: i64) -> Result<()> {
            self.touch()
        }
        async fn enable_courses(&self, _group_id: i64, _course_ids: &[i64]) -> Result<Value> {
            self.touch()
        }
    }

    #[async_trait]
    impl EnrollmentStore for CountingStore {
        async fn list_for_user(
            &self,
            _user_id: i64,
            _query: &ListQuery,
        ) -> Result<Page<Enrollment>> {
            self.touch()
        }
        async fn subscribe(&self, _user_id: i64, _course_id: i64) -> Result<Value> {
            self.touch()
        }
        async fn unsubscribe(&self, _user_id: i64, _course_id: i64) -> Result<Value> {
            self.touch()
        }
    }
}
