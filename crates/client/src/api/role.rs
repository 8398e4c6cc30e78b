//! Role API module

use std::sync::Arc;

use campus_domain::{ListQuery, NewRole, Page, Result, Role, RoleUpdate};

use super::{ensure_not_blank, ensure_positive_id};
use crate::datasource::RoleStore;

/// Facade operations for access roles
#[derive(Clone)]
pub struct RoleApi {
    store: Arc<dyn RoleStore>,
}

impl RoleApi {
    pub fn new(store: Arc<dyn RoleStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Page<Role>> {
        self.store.list(query).await
    }

    pub async fn get(&self, id: i64) -> Result<Role> {
        ensure_positive_id("Get Role", "id", id)?;
        self.store.get(id).await
    }

    pub async fn create(&self, draft: NewRole) -> Result<Role> {
        ensure_not_blank("Create Role", "name", &draft.name)?;
        self.store.create(draft).await
    }

    pub async fn update(&self, id: i64, patch: RoleUpdate) -> Result<Role> {
        ensure_positive_id("Update Role", "id", id)?;
        self.store.update(id, patch).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        ensure_positive_id("Delete Role", "id", id)?;
        self.store.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use campus_domain::ErrorKind;

    use super::*;
    use crate::api::tests_support::CountingStore;

    #[tokio::test]
    async fn test_create_requires_name() {
        let store = Arc::new(CountingStore::default());
        let api = RoleApi::new(store.clone());

        let err = api.create(NewRole::default()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_id_validation() {
        let store = Arc::new(CountingStore::default());
        let api = RoleApi::new(store.clone());

        assert_eq!(api.get(0).await.unwrap_err().kind(), ErrorKind::Validation);
        assert_eq!(api.delete(-7).await.unwrap_err().kind(), ErrorKind::Validation);
        assert_eq!(store.calls(), 0);
    }
}
