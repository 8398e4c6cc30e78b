//! Course resource types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::upload::FileUpload;

/// A published course as the backend returns it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub instructor: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a course.
///
/// `image` is not part of the JSON body; when present the whole payload is
/// submitted as multipart form data instead.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub category: String,
    #[serde(skip)]
    pub image: Option<FileUpload>,
}

/// Partial update for a course; `None` fields are left untouched
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_skips_absent_fields() {
        let patch = CourseUpdate { title: Some("Rust 101".into()), ..Default::default() };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 1);
        assert_eq!(value["title"], "Rust 101");
    }

    #[test]
    fn test_new_course_json_excludes_image() {
        let draft = NewCourse {
            title: "Rust 101".into(),
            instructor: "Ada".into(),
            image: Some(FileUpload::new("c.png", "image/png", vec![1, 2, 3])),
            ..Default::default()
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert!(value.get("image").is_none());
    }
}
