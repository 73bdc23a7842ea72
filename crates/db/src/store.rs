//! The storage abstraction the api crate is written against.

use async_trait::async_trait;
use warden_core::privilege::Privilege;
use warden_core::query::{PageWindow, Sort};
use warden_core::role::Role;
use warden_core::types::DbId;

/// Failures at the storage boundary.
///
/// The two conflict variants carry the referential/uniqueness classification
/// out of the storage layer so the api crate can map them to 409 without
/// inspecting backend-specific error codes.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The proposed name collides with an existing row. Raised atomically
    /// with the guarded write, so two concurrent writers cannot both pass.
    #[error("{entity} name '{name}' already exists")]
    DuplicateName { entity: &'static str, name: String },

    /// A write referenced a privilege that is not persisted.
    #[error("no persisted privilege with id {0}")]
    UnknownPrivilege(DbId),

    /// A backend fault (connection loss, constraint outside the contract).
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Shared persisted collections of roles and privileges.
///
/// Implementations must treat the name-uniqueness check and the write it
/// guards as one atomic unit, and must never leave a partial write behind:
/// a failed operation is indistinguishable from one that never ran.
#[async_trait]
pub trait Store: Send + Sync {
    /// Liveness probe for the health endpoint. Backends with a remote
    /// dependency override this to exercise it.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn find_role(&self, id: DbId) -> Result<Option<Role>, StoreError>;
    async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>, StoreError>;
    async fn list_roles(&self, sort: Sort) -> Result<Vec<Role>, StoreError>;
    async fn page_roles(&self, window: PageWindow, sort: Sort) -> Result<Vec<Role>, StoreError>;
    async fn count_roles(&self) -> Result<i64, StoreError>;
    /// Insert a role with the given privilege set, assigning a fresh id.
    async fn insert_role(&self, name: &str, privilege_ids: &[DbId]) -> Result<Role, StoreError>;
    /// Rename a role and replace its privilege set. `None` when no role with
    /// that id exists; the id itself never changes.
    async fn update_role(
        &self,
        id: DbId,
        name: &str,
        privilege_ids: &[DbId],
    ) -> Result<Option<Role>, StoreError>;
    /// Remove a role. `false` when no role with that id exists.
    async fn delete_role(&self, id: DbId) -> Result<bool, StoreError>;

    async fn find_privilege(&self, id: DbId) -> Result<Option<Privilege>, StoreError>;
    async fn find_privilege_by_name(&self, name: &str) -> Result<Option<Privilege>, StoreError>;
    async fn list_privileges(&self, sort: Sort) -> Result<Vec<Privilege>, StoreError>;
    async fn page_privileges(
        &self,
        window: PageWindow,
        sort: Sort,
    ) -> Result<Vec<Privilege>, StoreError>;
    async fn count_privileges(&self) -> Result<i64, StoreError>;
    async fn insert_privilege(&self, name: &str) -> Result<Privilege, StoreError>;
    async fn update_privilege(&self, id: DbId, name: &str)
        -> Result<Option<Privilege>, StoreError>;
    async fn delete_privilege(&self, id: DbId) -> Result<bool, StoreError>;
}
