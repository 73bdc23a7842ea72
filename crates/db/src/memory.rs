//! In-memory [`Store`] implementation.
//!
//! Backs the integration test suite and database-less deployments. All state
//! lives behind a single `RwLock`; every write takes the write guard for its
//! whole duration, which makes the uniqueness check and the guarded write one
//! atomic unit.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use warden_core::privilege::Privilege;
use warden_core::query::{PageWindow, SearchField, Sort, SortDirection};
use warden_core::role::Role;
use warden_core::types::DbId;

use crate::store::{Store, StoreError};

#[derive(Debug, Clone)]
struct StoredRole {
    id: DbId,
    name: String,
    privilege_ids: BTreeSet<DbId>,
}

#[derive(Default)]
struct Inner {
    roles: BTreeMap<DbId, StoredRole>,
    privileges: BTreeMap<DbId, Privilege>,
    next_role_id: DbId,
    next_privilege_id: DbId,
}

impl Inner {
    fn materialize(&self, stored: &StoredRole) -> Role {
        Role {
            id: stored.id,
            name: stored.name.clone(),
            privileges: stored
                .privilege_ids
                .iter()
                .filter_map(|id| self.privileges.get(id).cloned())
                .collect(),
        }
    }

    fn check_privileges_exist(&self, privilege_ids: &[DbId]) -> Result<(), StoreError> {
        for id in privilege_ids {
            if !self.privileges.contains_key(id) {
                return Err(StoreError::UnknownPrivilege(*id));
            }
        }
        Ok(())
    }
}

/// In-memory store over lock-guarded maps, with counter-based id assignment.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sort_roles(roles: &mut [Role], sort: Sort) {
    roles.sort_by(|a, b| {
        let ord = match sort.field {
            SearchField::Id => a.id.cmp(&b.id),
            SearchField::Name => a.name.cmp(&b.name).then(a.id.cmp(&b.id)),
        };
        match sort.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

fn sort_privileges(privileges: &mut [Privilege], sort: Sort) {
    privileges.sort_by(|a, b| {
        let ord = match sort.field {
            SearchField::Id => a.id.cmp(&b.id),
            SearchField::Name => a.name.cmp(&b.name).then(a.id.cmp(&b.id)),
        };
        match sort.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

fn window<T>(items: Vec<T>, w: PageWindow) -> Vec<T> {
    items
        .into_iter()
        .skip(w.offset.max(0) as usize)
        .take(w.limit.max(0) as usize)
        .collect()
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_role(&self, id: DbId) -> Result<Option<Role>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.roles.get(&id).map(|r| inner.materialize(r)))
    }

    async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .roles
            .values()
            .find(|r| r.name == name)
            .map(|r| inner.materialize(r)))
    }

    async fn list_roles(&self, sort: Sort) -> Result<Vec<Role>, StoreError> {
        let inner = self.inner.read().await;
        let mut roles: Vec<Role> = inner.roles.values().map(|r| inner.materialize(r)).collect();
        sort_roles(&mut roles, sort);
        Ok(roles)
    }

    async fn page_roles(&self, w: PageWindow, sort: Sort) -> Result<Vec<Role>, StoreError> {
        Ok(window(self.list_roles(sort).await?, w))
    }

    async fn count_roles(&self) -> Result<i64, StoreError> {
        Ok(self.inner.read().await.roles.len() as i64)
    }

    async fn insert_role(&self, name: &str, privilege_ids: &[DbId]) -> Result<Role, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.roles.values().any(|r| r.name == name) {
            return Err(StoreError::DuplicateName {
                entity: "role",
                name: name.to_string(),
            });
        }
        inner.check_privileges_exist(privilege_ids)?;
        inner.next_role_id += 1;
        let stored = StoredRole {
            id: inner.next_role_id,
            name: name.to_string(),
            privilege_ids: privilege_ids.iter().copied().collect(),
        };
        let role = inner.materialize(&stored);
        inner.roles.insert(stored.id, stored);
        Ok(role)
    }

    async fn update_role(
        &self,
        id: DbId,
        name: &str,
        privilege_ids: &[DbId],
    ) -> Result<Option<Role>, StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.roles.contains_key(&id) {
            return Ok(None);
        }
        if inner.roles.values().any(|r| r.name == name && r.id != id) {
            return Err(StoreError::DuplicateName {
                entity: "role",
                name: name.to_string(),
            });
        }
        inner.check_privileges_exist(privilege_ids)?;
        let stored = StoredRole {
            id,
            name: name.to_string(),
            privilege_ids: privilege_ids.iter().copied().collect(),
        };
        let role = inner.materialize(&stored);
        inner.roles.insert(id, stored);
        Ok(Some(role))
    }

    async fn delete_role(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.roles.remove(&id).is_some())
    }

    async fn find_privilege(&self, id: DbId) -> Result<Option<Privilege>, StoreError> {
        Ok(self.inner.read().await.privileges.get(&id).cloned())
    }

    async fn find_privilege_by_name(&self, name: &str) -> Result<Option<Privilege>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.privileges.values().find(|p| p.name == name).cloned())
    }

    async fn list_privileges(&self, sort: Sort) -> Result<Vec<Privilege>, StoreError> {
        let mut privileges: Vec<Privilege> =
            self.inner.read().await.privileges.values().cloned().collect();
        sort_privileges(&mut privileges, sort);
        Ok(privileges)
    }

    async fn page_privileges(
        &self,
        w: PageWindow,
        sort: Sort,
    ) -> Result<Vec<Privilege>, StoreError> {
        Ok(window(self.list_privileges(sort).await?, w))
    }

    async fn count_privileges(&self) -> Result<i64, StoreError> {
        Ok(self.inner.read().await.privileges.len() as i64)
    }

    async fn insert_privilege(&self, name: &str) -> Result<Privilege, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.privileges.values().any(|p| p.name == name) {
            return Err(StoreError::DuplicateName {
                entity: "privilege",
                name: name.to_string(),
            });
        }
        inner.next_privilege_id += 1;
        let privilege = Privilege {
            id: inner.next_privilege_id,
            name: name.to_string(),
        };
        inner.privileges.insert(privilege.id, privilege.clone());
        Ok(privilege)
    }

    async fn update_privilege(
        &self,
        id: DbId,
        name: &str,
    ) -> Result<Option<Privilege>, StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.privileges.contains_key(&id) {
            return Ok(None);
        }
        if inner.privileges.values().any(|p| p.name == name && p.id != id) {
            return Err(StoreError::DuplicateName {
                entity: "privilege",
                name: name.to_string(),
            });
        }
        let privilege = Privilege {
            id,
            name: name.to_string(),
        };
        inner.privileges.insert(id, privilege.clone());
        Ok(Some(privilege))
    }

    async fn delete_privilege(&self, id: DbId) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.privileges.remove(&id).is_none() {
            return Ok(false);
        }
        // Mirror the cascade the durable schema applies via foreign keys.
        for role in inner.roles.values_mut() {
            role.privilege_ids.remove(&id);
        }
        Ok(true)
    }
}
