//! Data-source strategy
//!
//! One trait family per resource, with two interchangeable
//! implementations: [`RemoteDataSource`] over HTTP and [`FixtureDataSource`]
//! over in-memory fixtures. Which one backs the facade is decided once at
//! composition time; callers cannot tell them apart by return shape or
//! error kind, only by latency and the absence of a network requirement.

use async_trait::async_trait;
use campus_domain::{
    Course, CourseUpdate, CourseVideo, Enrollment, Group, GroupUpdate, ListQuery, NewCourse,
    NewGroup, NewRole, NewVideo, Page, Result, Role, RoleUpdate, VideoUpdate,
};
use serde_json::Value;

use crate::http::ProgressSink;

pub mod fixture;
pub mod remote;

pub use fixture::FixtureDataSource;
pub use remote::RemoteDataSource;

/// Course persistence operations
#[async_trait]
pub trait CourseStore: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<Page<Course>>;
    async fn get(&self, id: i64) -> Result<Course>;
    /// Create a course; multipart when the draft carries an image,
    /// JSON otherwise. `progress` only ticks on the multipart path.
    async fn create(&self, draft: NewCourse, progress: Option<ProgressSink>) -> Result<Course>;
    async fn update(&self, id: i64, patch: CourseUpdate) -> Result<Course>;
    async fn delete(&self, id: i64) -> Result<()>;
    async fn categories(&self) -> Result<Vec<String>>;
}

/// Course video persistence operations
#[async_trait]
pub trait VideoStore: Send + Sync {
    async fn list_for_course(&self, course_id: i64, query: &ListQuery)
        -> Result<Page<CourseVideo>>;
    async fn get(&self, id: i64) -> Result<CourseVideo>;
    /// Always multipart; the draft carries the binary
    async fn upload(&self, draft: NewVideo, progress: Option<ProgressSink>)
        -> Result<CourseVideo>;
    async fn update(&self, id: i64, patch: VideoUpdate) -> Result<CourseVideo>;
    async fn delete(&self, id: i64) -> Result<()>;
}

/// Role persistence operations
#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<Page<Role>>;
    async fn get(&self, id: i64) -> Result<Role>;
    async fn create(&self, draft: NewRole) -> Result<Role>;
    async fn update(&self, id: i64, patch: RoleUpdate) -> Result<Role>;
    async fn delete(&self, id: i64) -> Result<()>;
}

/// Group persistence operations
#[async_trait]
pub trait GroupStore: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<Page<Group>>;
    async fn get(&self, id: i64) -> Result<Group>;
    async fn create(&self, draft: NewGroup) -> Result<Group>;
    async fn update(&self, id: i64, patch: GroupUpdate) -> Result<Group>;
    async fn delete(&self, id: i64) -> Result<()>;
    /// Bulk-enable courses for a group; the server acknowledgement is
    /// passed through unmodified
    async fn enable_courses(&self, group_id: i64, course_ids: &[i64]) -> Result<Value>;
}

/// Enrollment (user-course relation) operations
#[async_trait]
pub trait EnrollmentStore: Send + Sync {
    async fn list_for_user(&self, user_id: i64, query: &ListQuery) -> Result<Page<Enrollment>>;
    async fn subscribe(&self, user_id: i64, course_id: i64) -> Result<Value>;
    async fn unsubscribe(&self, user_id: i64, course_id: i64) -> Result<Value>;
}
