//! Enrollment (user-course relation) types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's subscription to a course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub enrolled_at: DateTime<Utc>,
}
