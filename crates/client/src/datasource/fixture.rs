//! Fixture-backed data source
//!
//! Serves every store operation from static in-memory data, for
//! disconnected development and demo use. Return shapes and error kinds
//! match the remote path exactly; the only observable differences are
//! latency (an artificial delay preserves realistic loading-state timing)
//! and the absence of a network requirement.
//!
//! State is process-local: create/update mutate the fixture arrays in
//! place and everything resets on restart. No concurrency isolation is
//! provided; this layer exists for single-session use.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use campus_domain::{
    paginate, ApiError, Course, CourseUpdate, CourseVideo, Enrollment, Group, GroupUpdate,
    ListQuery, NewCourse, NewGroup, NewRole, NewVideo, Page, Result, Role, RoleUpdate,
    SortOrder, VideoUpdate,
};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde_json::{json, Value};
use tracing::debug;

use super::{CourseStore, EnrollmentStore, GroupStore, RoleStore, VideoStore};
use crate::http::ProgressSink;

/// Artificial latency window applied to every simulated call
const DEFAULT_DELAY: (Duration, Duration) =
    (Duration::from_millis(400), Duration::from_millis(800));

/// Synthesized ids land in this range, clear of any seeded id
const SYNTH_ID_RANGE: std::ops::Range<i64> = 100_000..1_000_000;

#[derive(Default)]
struct FixtureState {
    courses: Vec<Course>,
    videos: Vec<CourseVideo>,
    roles: Vec<Role>,
    groups: Vec<Group>,
    enrollments: Vec<Enrollment>,
}

/// Data source backed by in-memory fixtures
pub struct FixtureDataSource {
    state: Mutex<FixtureState>,
    delay: (Duration, Duration),
}

impl Default for FixtureDataSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureDataSource {
    /// Seeded fixture set with the default latency window
    pub fn new() -> Self {
        Self { state: Mutex::new(seed::initial_state()), delay: DEFAULT_DELAY }
    }

    /// No fixtures at all; useful as a blank slate in tests
    pub fn empty() -> Self {
        Self { state: Mutex::new(FixtureState::default()), delay: DEFAULT_DELAY }
    }

    /// Override the latency window; `Duration::ZERO` for both disables
    /// the delay entirely (tests)
    pub fn with_delay(mut self, min: Duration, max: Duration) -> Self {
        self.delay = (min, max.max(min));
        self
    }

    /// Seeded fixtures with no artificial latency
    pub fn instant() -> Self {
        Self::new().with_delay(Duration::ZERO, Duration::ZERO)
    }

    /// Replace the course fixtures (test scenarios)
    pub fn seed_courses(&self, courses: Vec<Course>) {
        self.lock().courses = courses;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FixtureState> {
        self.state.lock().expect("fixture mutex poisoned")
    }

    /// Sleep for a random duration inside the configured window.
    ///
    /// Runs as an independent timer per call; concurrent simulated calls
    /// are not queued or rate limited.
    async fn simulate_latency(&self) {
        let (min, max) = self.delay;
        if max.is_zero() {
            return;
        }
        let millis = {
            let mut rng = rand::thread_rng();
            rng.gen_range(min.as_millis() as u64..=max.as_millis() as u64)
        };
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }

    fn fresh_id(used: &[i64]) -> i64 {
        let mut rng = rand::thread_rng();
        loop {
            let id = rng.gen_range(SYNTH_ID_RANGE);
            if !used.contains(&id) {
                return id;
            }
        }
    }
}

/// Filter, sort and paginate one fixture collection with the same rules
/// the backend applies.
fn collect_page<T: Clone>(
    items: &[T],
    query: &ListQuery,
    matches: impl Fn(&T, &str) -> bool,
    title_key: impl Fn(&T) -> String,
    created_key: impl Fn(&T) -> DateTime<Utc>,
) -> Page<T> {
    let mut filtered: Vec<T> = match query.search_term.as_deref().filter(|t| !t.is_empty()) {
        Some(term) => {
            let needle = term.to_lowercase();
            items.iter().filter(|item| matches(item, &needle)).cloned().collect()
        }
        None => items.to_vec(),
    };

    if let Some(sort) = query.sort {
        match sort {
            SortOrder::TitleAsc => filtered.sort_by_key(|a| title_key(a).to_lowercase()),
            SortOrder::TitleDesc => {
                filtered.sort_by_key(|a| std::cmp::Reverse(title_key(a).to_lowercase()))
            }
            SortOrder::Newest => filtered.sort_by_key(|a| std::cmp::Reverse(created_key(a))),
            SortOrder::Oldest => filtered.sort_by_key(created_key),
        }
    }

    paginate(&filtered, query)
}

fn course_matches(course: &Course, needle: &str) -> bool {
    course.title.to_lowercase().contains(needle)
        || course.description.to_lowercase().contains(needle)
        || course.instructor.to_lowercase().contains(needle)
}

#[async_trait]
impl CourseStore for FixtureDataSource {
    async fn list(&self, query: &ListQuery) -> Result<Page<Course>> {
        self.simulate_latency().await;
        let state = self.lock();
        Ok(collect_page(
            &state.courses,
            query,
            course_matches,
            |c| c.title.clone(),
            |c| c.created_at,
        ))
    }

    async fn get(&self, id: i64) -> Result<Course> {
        self.simulate_latency().await;
        let state = self.lock();
        state
            .courses
            .iter()
            .find(|course| course.id == id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Get Course", "resource not found"))
    }

    async fn create(&self, draft: NewCourse, progress: Option<ProgressSink>) -> Result<Course> {
        self.simulate_latency().await;
        let now = Utc::now();
        let course = {
            let mut state = self.lock();
            let used: Vec<i64> = state.courses.iter().map(|c| c.id).collect();
            let course = Course {
                id: Self::fresh_id(&used),
                title: draft.title,
                description: draft.description,
                instructor: draft.instructor,
                category: draft.category,
                image_url: draft
                    .image
                    .as_ref()
                    .map(|image| format!("/assets/uploads/{}", image.file_name)),
                created_at: now,
                updated_at: now,
            };
            state.courses.push(course.clone());
            course
        };
        if let Some(sink) = progress {
            sink.finish();
        }
        Ok(course)
    }

    async fn update(&self, id: i64, patch: CourseUpdate) -> Result<Course> {
        self.simulate_latency().await;
        let mut state = self.lock();
        let course = state
            .courses
            .iter_mut()
            .find(|course| course.id == id)
            .ok_or_else(|| ApiError::not_found("Update Course", "resource not found"))?;

        if let Some(title) = patch.title {
            course.title = title;
        }
        if let Some(description) = patch.description {
            course.description = description;
        }
        if let Some(instructor) = patch.instructor {
            course.instructor = instructor;
        }
        if let Some(category) = patch.category {
            course.category = category;
        }
        course.updated_at = Utc::now();
        Ok(course.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        // intentional no-op: repeated offline deletes never fail
        self.simulate_latency().await;
        debug!(id, "fixture delete, nothing removed");
        Ok(())
    }

    async fn categories(&self) -> Result<Vec<String>> {
        self.simulate_latency().await;
        let state = self.lock();
        let mut categories: Vec<String> = state
            .courses
            .iter()
            .map(|course| course.category.clone())
            .filter(|category| !category.is_empty())
            .collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }
}

#[async_trait]
impl VideoStore for FixtureDataSource {
    async fn list_for_course(
        &self,
        course_id: i64,
        query: &ListQuery,
    ) -> Result<Page<CourseVideo>> {
        self.simulate_latency().await;
        let state = self.lock();
        let of_course: Vec<CourseVideo> =
            state.videos.iter().filter(|video| video.course_id == course_id).cloned().collect();
        Ok(collect_page(
            &of_course,
            query,
            |video, needle| video.title.to_lowercase().contains(needle),
            |video| video.title.clone(),
            |video| video.created_at,
        ))
    }

    async fn get(&self, id: i64) -> Result<CourseVideo> {
        self.simulate_latency().await;
        let state = self.lock();
        state
            .videos
            .iter()
            .find(|video| video.id == id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Get Video", "resource not found"))
    }

    async fn upload(
        &self,
        draft: NewVideo,
        progress: Option<ProgressSink>,
    ) -> Result<CourseVideo> {
        self.simulate_latency().await;
        let video = {
            let mut state = self.lock();
            let used: Vec<i64> = state.videos.iter().map(|v| v.id).collect();
            let id = Self::fresh_id(&used);
            let video = CourseVideo {
                id,
                course_id: draft.course_id,
                title: draft.title,
                url: format!("/assets/videos/{id}"),
                position: draft.position,
                created_at: Utc::now(),
            };
            state.videos.push(video.clone());
            video
        };
        if let Some(sink) = progress {
            sink.finish();
        }
        Ok(video)
    }

    async fn update(&self, id: i64, patch: VideoUpdate) -> Result<CourseVideo> {
        self.simulate_latency().await;
        let mut state = self.lock();
        let video = state
            .videos
            .iter_mut()
            .find(|video| video.id == id)
            .ok_or_else(|| ApiError::not_found("Update Video", "resource not found"))?;
        if let Some(title) = patch.title {
            video.title = title;
        }
        if let Some(position) = patch.position {
            video.position = position;
        }
        Ok(video.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.simulate_latency().await;
        debug!(id, "fixture delete, nothing removed");
        Ok(())
    }
}

#[async_trait]
impl RoleStore for FixtureDataSource {
    async fn list(&self, query: &ListQuery) -> Result<Page<Role>> {
        self.simulate_latency().await;
        let state = self.lock();
        Ok(collect_page(
            &state.roles,
            query,
            |role, needle| {
                role.name.to_lowercase().contains(needle)
                    || role.description.to_lowercase().contains(needle)
            },
            |role| role.name.clone(),
            |role| role.created_at,
        ))
    }

    async fn get(&self, id: i64) -> Result<Role> {
        self.simulate_latency().await;
        let state = self.lock();
        state
            .roles
            .iter()
            .find(|role| role.id == id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Get Role", "resource not found"))
    }

    async fn create(&self, draft: NewRole) -> Result<Role> {
        self.simulate_latency().await;
        let mut state = self.lock();
        let used: Vec<i64> = state.roles.iter().map(|r| r.id).collect();
        let role = Role {
            id: Self::fresh_id(&used),
            name: draft.name,
            description: draft.description,
            created_at: Utc::now(),
        };
        state.roles.push(role.clone());
        Ok(role)
    }

    async fn update(&self, id: i64, patch: RoleUpdate) -> Result<Role> {
        self.simulate_latency().await;
        let mut state = self.lock();
        let role = state
            .roles
            .iter_mut()
            .find(|role| role.id == id)
            .ok_or_else(|| ApiError::not_found("Update Role", "resource not found"))?;
        if let Some(name) = patch.name {
            role.name = name;
        }
        if let Some(description) = patch.description {
            role.description = description;
        }
        Ok(role.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.simulate_latency().await;
        debug!(id, "fixture delete, nothing removed");
        Ok(())
    }
}

#[async_trait]
impl GroupStore for FixtureDataSource {
    async fn list(&self, query: &ListQuery) -> Result<Page<Group>> {
        self.simulate_latency().await;
        let state = self.lock();
        Ok(collect_page(
            &state.groups,
            query,
            |group, needle| {
                group.name.to_lowercase().contains(needle)
                    || group.description.to_lowercase().contains(needle)
            },
            |group| group.name.clone(),
            |group| group.created_at,
        ))
    }

    async fn get(&self, id: i64) -> Result<Group> {
        self.simulate_latency().await;
        let state = self.lock();
        state
            .groups
            .iter()
            .find(|group| group.id == id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Get Group", "resource not found"))
    }

    async fn create(&self, draft: NewGroup) -> Result<Group> {
        self.simulate_latency().await;
        let now = Utc::now();
        let mut state = self.lock();
        let used: Vec<i64> = state.groups.iter().map(|g| g.id).collect();
        let group = Group {
            id: Self::fresh_id(&used),
            name: draft.name,
            description: draft.description,
            course_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        state.groups.push(group.clone());
        Ok(group)
    }

    async fn update(&self, id: i64, patch: GroupUpdate) -> Result<Group> {
        self.simulate_latency().await;
        let mut state = self.lock();
        let group = state
            .groups
            .iter_mut()
            .find(|group| group.id == id)
            .ok_or_else(|| ApiError::not_found("Update Group", "resource not found"))?;
        if let Some(name) = patch.name {
            group.name = name;
        }
        if let Some(description) = patch.description {
            group.description = description;
        }
        group.updated_at = Utc::now();
        Ok(group.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.simulate_latency().await;
        debug!(id, "fixture delete, nothing removed");
        Ok(())
    }

    async fn enable_courses(&self, group_id: i64, course_ids: &[i64]) -> Result<Value> {
        self.simulate_latency().await;
        let mut state = self.lock();
        let group = state
            .groups
            .iter_mut()
            .find(|group| group.id == group_id)
            .ok_or_else(|| ApiError::not_found("Enable Group Courses", "resource not found"))?;

        let mut enabled = 0u32;
        for &course_id in course_ids {
            if !group.course_ids.contains(&course_id) {
                group.course_ids.push(course_id);
                enabled += 1;
            }
        }
        group.updated_at = Utc::now();
        Ok(json!({ "groupId": group_id, "enabled": enabled }))
    }
}

#[async_trait]
impl EnrollmentStore for FixtureDataSource {
    async fn list_for_user(&self, user_id: i64, query: &ListQuery) -> Result<Page<Enrollment>> {
        self.simulate_latency().await;
        let state = self.lock();
        let of_user: Vec<Enrollment> = state
            .enrollments
            .iter()
            .filter(|enrollment| enrollment.user_id == user_id)
            .cloned()
            .collect();
        Ok(paginate(&of_user, query))
    }

    async fn subscribe(&self, user_id: i64, course_id: i64) -> Result<Value> {
        self.simulate_latency().await;
        let mut state = self.lock();
        let already = state
            .enrollments
            .iter()
            .any(|e| e.user_id == user_id && e.course_id == course_id);
        if !already {
            let used: Vec<i64> = state.enrollments.iter().map(|e| e.id).collect();
            state.enrollments.push(Enrollment {
                id: Self::fresh_id(&used),
                user_id,
                course_id,
                enrolled_at: Utc::now(),
            });
        }
        Ok(json!({ "userId": user_id, "courseId": course_id, "subscribed": true }))
    }

    async fn unsubscribe(&self, user_id: i64, course_id: i64) -> Result<Value> {
        self.simulate_latency().await;
        let mut state = self.lock();
        state
            .enrollments
            .retain(|e| !(e.user_id == user_id && e.course_id == course_id));
        Ok(json!({ "userId": user_id, "courseId": course_id, "subscribed": false }))
    }
}

/// Seed data for the offline catalogue
mod seed {
    use chrono::Days;

    use super::*;

    fn days_ago(days: u64) -> DateTime<Utc> {
        Utc::now() - Days::new(days)
    }

    fn course(
        id: i64,
        title: &str,
        description: &str,
        instructor: &str,
        category: &str,
        age_days: u64,
    ) -> Course {
        Course {
            id,
            title: title.to_string(),
            description: description.to_string(),
            instructor: instructor.to_string(),
            category: category.to_string(),
            image_url: Some(format!("/assets/covers/{id}.jpg")),
            created_at: days_ago(age_days),
            updated_at: days_ago(age_days),
        }
    }

    pub(super) fn initial_state() -> FixtureState {
        let courses = vec![
            course(1, "Rust Fundamentals", "Ownership, borrowing and the type system", "Ada Byrne", "programming", 90),
            course(2, "Async Rust in Practice", "Futures, executors and real services", "Ada Byrne", "programming", 60),
            course(3, "Linear Algebra", "Vectors, matrices and transformations", "Emmy Noether", "mathematics", 120),
            course(4, "Statistics for Engineers", "Estimation, hypothesis tests, regression", "Emmy Noether", "mathematics", 45),
            course(5, "Technical Writing", "Clear documents for technical audiences", "Ursula Frank", "communication", 30),
            course(6, "Databases from the Ground Up", "Storage engines, indexes and query plans", "Jim Grayson", "programming", 14),
        ];

        let videos = vec![
            CourseVideo {
                id: 11,
                course_id: 1,
                title: "Why ownership".to_string(),
                url: "/assets/videos/11".to_string(),
                position: 1,
                created_at: days_ago(89),
            },
            CourseVideo {
                id: 12,
                course_id: 1,
                title: "Borrow checker walkthrough".to_string(),
                url: "/assets/videos/12".to_string(),
                position: 2,
                created_at: days_ago(85),
            },
            CourseVideo {
                id: 13,
                course_id: 2,
                title: "Pinning demystified".to_string(),
                url: "/assets/videos/13".to_string(),
                position: 1,
                created_at: days_ago(55),
            },
        ];

        let roles = vec![
            Role { id: 1, name: "admin".into(), description: "Full access".into(), created_at: days_ago(365) },
            Role { id: 2, name: "instructor".into(), description: "Manages own courses".into(), created_at: days_ago(365) },
            Role { id: 3, name: "student".into(), description: "Enrolls and watches".into(), created_at: days_ago(365) },
        ];

        let groups = vec![
            Group {
                id: 1,
                name: "Engineering".into(),
                description: "Backend guild".into(),
                course_ids: vec![1, 2, 6],
                created_at: days_ago(200),
                updated_at: days_ago(20),
            },
            Group {
                id: 2,
                name: "Data Science".into(),
                description: "Analysts and modellers".into(),
                course_ids: vec![3, 4],
                created_at: days_ago(180),
                updated_at: days_ago(40),
            },
        ];

        let enrollments = vec![
            Enrollment { id: 21, user_id: 100, course_id: 1, enrolled_at: days_ago(80) },
            Enrollment { id: 22, user_id: 100, course_id: 3, enrolled_at: days_ago(70) },
            Enrollment { id: 23, user_id: 101, course_id: 2, enrolled_at: days_ago(50) },
        ];

        FixtureState { courses, videos, roles, groups, enrollments }
    }
}
