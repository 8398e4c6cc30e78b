//! Course video resource types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::upload::FileUpload;

/// A video attached to a course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseVideo {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    /// Playback URL assigned by the backend after upload
    #[serde(default)]
    pub url: String,
    /// Position within the course outline, 1-based
    #[serde(default)]
    pub position: u32,
    pub created_at: DateTime<Utc>,
}

/// Payload for uploading a video; always submitted as multipart
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub course_id: i64,
    pub title: String,
    pub position: u32,
    pub file: FileUpload,
}

/// Partial update for a video's metadata (the binary is immutable)
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}
