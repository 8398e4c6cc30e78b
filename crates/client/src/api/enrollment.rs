//! Enrollment API module

use std::sync::Arc;

use campus_domain::{Enrollment, ListQuery, Page, Result};
use serde_json::Value;

use super::ensure_positive_id;
use crate::datasource::EnrollmentStore;

/// Facade operations for user-course subscriptions
#[derive(Clone)]
pub struct EnrollmentApi {
    store: Arc<dyn EnrollmentStore>,
}

impl EnrollmentApi {
    pub fn new(store: Arc<dyn EnrollmentStore>) -> Self {
        Self { store }
    }

    /// Courses the user is subscribed to
    pub async fn list_for_user(&self, user_id: i64, query: &ListQuery) -> Result<Page<Enrollment>> {
        ensure_positive_id("List Enrollments", "user id", user_id)?;
        self.store.list_for_user(user_id, query).await
    }

    /// Subscribe a user to a course; the acknowledgement passes through
    /// unmodified
    pub async fn subscribe(&self, user_id: i64, course_id: i64) -> Result<Value> {
        let context = "Subscribe Course";
        ensure_positive_id(context, "user id", user_id)?;
        ensure_positive_id(context, "course id", course_id)?;
        self.store.subscribe(user_id, course_id).await
    }

    /// Remove a user's subscription
    pub async fn unsubscribe(&self, user_id: i64, course_id: i64) -> Result<Value> {
        let context = "Unsubscribe Course";
        ensure_positive_id(context, "user id", user_id)?;
        ensure_positive_id(context, "course id", course_id)?;
        self.store.unsubscribe(user_id, course_id).await
    }
}
