//! PostgreSQL [`Store`] implementation.
//!
//! Runtime-bound queries throughout. Name uniqueness rides on the `uq_*`
//! constraints and association validity on the `role_privileges` foreign
//! keys, so both checks are atomic with the write that they guard; the
//! resulting database errors are translated back into the typed conflicts
//! the contract defines. Multi-statement writes run in one transaction.

use std::collections::HashSet;

use async_trait::async_trait;
use warden_core::privilege::Privilege;
use warden_core::query::{PageWindow, SearchField, Sort, SortDirection};
use warden_core::role::Role;
use warden_core::types::DbId;

use crate::models::{group_roles, PrivilegeRow, RoleFlatRow, RoleRow};
use crate::store::{Store, StoreError};
use crate::DbPool;

const ROLE_JOIN: &str = "SELECT r.id, r.name, p.id AS privilege_id, p.name AS privilege_name \
     FROM roles r \
     LEFT JOIN role_privileges rp ON rp.role_id = r.id \
     LEFT JOIN privileges p ON p.id = rp.privilege_id";

/// Durable store over a PostgreSQL pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn privilege_set(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        role_id: DbId,
    ) -> Result<HashSet<Privilege>, sqlx::Error> {
        let rows: Vec<PrivilegeRow> = sqlx::query_as(
            "SELECT p.id, p.name FROM privileges p \
             JOIN role_privileges rp ON rp.privilege_id = p.id \
             WHERE rp.role_id = $1",
        )
        .bind(role_id)
        .fetch_all(&mut **tx)
        .await?;
        Ok(rows.into_iter().map(Privilege::from).collect())
    }

    async fn link_privileges(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        role_id: DbId,
        privilege_ids: &[DbId],
    ) -> Result<(), StoreError> {
        for privilege_id in privilege_ids {
            sqlx::query(
                "INSERT INTO role_privileges (role_id, privilege_id) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(role_id)
            .bind(privilege_id)
            .execute(&mut **tx)
            .await
            .map_err(|e| classify_association_error(e, *privilege_id))?;
        }
        Ok(())
    }
}

fn order_clause(sort: Sort, prefix: &str) -> String {
    let dir = match sort.direction {
        SortDirection::Ascending => "ASC",
        SortDirection::Descending => "DESC",
    };
    match sort.field {
        SearchField::Id => format!("{prefix}id {dir}"),
        // Secondary id key keeps rows for one role contiguous and the
        // ordering stable under name ties.
        SearchField::Name => format!("{prefix}name {dir}, {prefix}id ASC"),
    }
}

/// Translate a unique-constraint violation (PostgreSQL 23505 on a `uq_*`
/// constraint) into the typed duplicate-name conflict.
fn classify_write_error(err: sqlx::Error, entity: &'static str, name: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505")
            && db_err.constraint().is_some_and(|c| c.starts_with("uq_"))
        {
            return StoreError::DuplicateName {
                entity,
                name: name.to_string(),
            };
        }
    }
    StoreError::Database(err)
}

/// Translate a foreign-key violation (PostgreSQL 23503) on the association
/// table into the typed unknown-privilege conflict.
fn classify_association_error(err: sqlx::Error, privilege_id: DbId) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23503") {
            return StoreError::UnknownPrivilege(privilege_id);
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn find_role(&self, id: DbId) -> Result<Option<Role>, StoreError> {
        let rows: Vec<RoleFlatRow> = sqlx::query_as(&format!("{ROLE_JOIN} WHERE r.id = $1"))
            .bind(id)
            .fetch_all(&self.pool)
            .await?;
        Ok(group_roles(rows).into_iter().next())
    }

    async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>, StoreError> {
        let rows: Vec<RoleFlatRow> = sqlx::query_as(&format!("{ROLE_JOIN} WHERE r.name = $1"))
            .bind(name)
            .fetch_all(&self.pool)
            .await?;
        Ok(group_roles(rows).into_iter().next())
    }

    async fn list_roles(&self, sort: Sort) -> Result<Vec<Role>, StoreError> {
        let order = order_clause(sort, "r.");
        let rows: Vec<RoleFlatRow> = sqlx::query_as(&format!("{ROLE_JOIN} ORDER BY {order}"))
            .fetch_all(&self.pool)
            .await?;
        Ok(group_roles(rows))
    }

    async fn page_roles(&self, w: PageWindow, sort: Sort) -> Result<Vec<Role>, StoreError> {
        let inner = order_clause(sort, "");
        let outer = order_clause(sort, "r.");
        let query = format!(
            "SELECT r.id, r.name, p.id AS privilege_id, p.name AS privilege_name \
             FROM (SELECT id, name FROM roles ORDER BY {inner} LIMIT $1 OFFSET $2) r \
             LEFT JOIN role_privileges rp ON rp.role_id = r.id \
             LEFT JOIN privileges p ON p.id = rp.privilege_id \
             ORDER BY {outer}"
        );
        let rows: Vec<RoleFlatRow> = sqlx::query_as(&query)
            .bind(w.limit)
            .bind(w.offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(group_roles(rows))
    }

    async fn count_roles(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM roles")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn insert_role(&self, name: &str, privilege_ids: &[DbId]) -> Result<Role, StoreError> {
        let mut tx = self.pool.begin().await?;
        let row: RoleRow = sqlx::query_as("INSERT INTO roles (name) VALUES ($1) RETURNING id, name")
            .bind(name)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| classify_write_error(e, "role", name))?;
        Self::link_privileges(&mut tx, row.id, privilege_ids).await?;
        let privileges = Self::privilege_set(&mut tx, row.id).await?;
        tx.commit().await?;
        Ok(Role {
            id: row.id,
            name: row.name,
            privileges,
        })
    }

    async fn update_role(
        &self,
        id: DbId,
        name: &str,
        privilege_ids: &[DbId],
    ) -> Result<Option<Role>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let row: Option<RoleRow> =
            sqlx::query_as("UPDATE roles SET name = $2 WHERE id = $1 RETURNING id, name")
                .bind(id)
                .bind(name)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| classify_write_error(e, "role", name))?;
        let Some(row) = row else {
            return Ok(None);
        };
        sqlx::query("DELETE FROM role_privileges WHERE role_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        Self::link_privileges(&mut tx, id, privilege_ids).await?;
        let privileges = Self::privilege_set(&mut tx, id).await?;
        tx.commit().await?;
        Ok(Some(Role {
            id: row.id,
            name: row.name,
            privileges,
        }))
    }

    async fn delete_role(&self, id: DbId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_privilege(&self, id: DbId) -> Result<Option<Privilege>, StoreError> {
        let row: Option<PrivilegeRow> =
            sqlx::query_as("SELECT id, name FROM privileges WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Privilege::from))
    }

    async fn find_privilege_by_name(&self, name: &str) -> Result<Option<Privilege>, StoreError> {
        let row: Option<PrivilegeRow> =
            sqlx::query_as("SELECT id, name FROM privileges WHERE name = $1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Privilege::from))
    }

    async fn list_privileges(&self, sort: Sort) -> Result<Vec<Privilege>, StoreError> {
        let order = order_clause(sort, "");
        let rows: Vec<PrivilegeRow> =
            sqlx::query_as(&format!("SELECT id, name FROM privileges ORDER BY {order}"))
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Privilege::from).collect())
    }

    async fn page_privileges(
        &self,
        w: PageWindow,
        sort: Sort,
    ) -> Result<Vec<Privilege>, StoreError> {
        let order = order_clause(sort, "");
        let rows: Vec<PrivilegeRow> = sqlx::query_as(&format!(
            "SELECT id, name FROM privileges ORDER BY {order} LIMIT $1 OFFSET $2"
        ))
        .bind(w.limit)
        .bind(w.offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Privilege::from).collect())
    }

    async fn count_privileges(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM privileges")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn insert_privilege(&self, name: &str) -> Result<Privilege, StoreError> {
        let row: PrivilegeRow =
            sqlx::query_as("INSERT INTO privileges (name) VALUES ($1) RETURNING id, name")
                .bind(name)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| classify_write_error(e, "privilege", name))?;
        Ok(row.into())
    }

    async fn update_privilege(
        &self,
        id: DbId,
        name: &str,
    ) -> Result<Option<Privilege>, StoreError> {
        let row: Option<PrivilegeRow> =
            sqlx::query_as("UPDATE privileges SET name = $2 WHERE id = $1 RETURNING id, name")
                .bind(id)
                .bind(name)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| classify_write_error(e, "privilege", name))?;
        Ok(row.map(Privilege::from))
    }

    async fn delete_privilege(&self, id: DbId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM privileges WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
