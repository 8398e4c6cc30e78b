//! Group API module

use std::sync::Arc;

use campus_domain::{Group, GroupUpdate, ListQuery, NewGroup, Page, Result};
use serde_json::Value;

use super::{ensure_not_blank, ensure_positive_id};
use crate::datasource::GroupStore;

/// Facade operations for user groups
#[derive(Clone)]
pub struct GroupApi {
    store: Arc<dyn GroupStore>,
}

impl GroupApi {
    pub fn new(store: Arc<dyn GroupStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Page<Group>> {
        self.store.list(query).await
    }

    pub async fn get(&self, id: i64) -> Result<Group> {
        ensure_positive_id("Get Group", "id", id)?;
        self.store.get(id).await
    }

    pub async fn create(&self, draft: NewGroup) -> Result<Group> {
        ensure_not_blank("Create Group", "name", &draft.name)?;
        self.store.create(draft).await
    }

    pub async fn update(&self, id: i64, patch: GroupUpdate) -> Result<Group> {
        ensure_positive_id("Update Group", "id", id)?;
        self.store.update(id, patch).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        ensure_positive_id("Delete Group", "id", id)?;
        self.store.delete(id).await
    }

    /// Bulk-enable courses for a group.
    ///
    /// Every referenced id is checked before anything is sent; the
    /// server's acknowledgement comes back unmodified.
    pub async fn enable_courses(&self, group_id: i64, course_ids: &[i64]) -> Result<Value> {
        let context = "Enable Group Courses";
        ensure_positive_id(context, "group id", group_id)?;
        for &course_id in course_ids {
            ensure_positive_id(context, "course id", course_id)?;
        }
        self.store.enable_courses(group_id, course_ids).await
    }
}

#[cfg(test)]
mod tests {
    use campus_domain::ErrorKind;

    use super::*;
    use crate::api::tests_support::CountingStore;

    #[tokio::test]
    async fn test_enable_courses_checks_every_id() {
        let store = Arc::new(CountingStore::default());
        let api = GroupApi::new(store.clone());

        let err = api.enable_courses(1, &[2, 0, 3]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "Enable Group Courses: course id must be a positive integer");

        let err = api.enable_courses(-1, &[2]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let store = Arc::new(CountingStore::default());
        let api = GroupApi::new(store.clone());

        let err = api.create(NewGroup::default()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(store.calls(), 0);
    }
}
