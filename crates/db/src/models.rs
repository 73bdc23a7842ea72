//! Row shapes for the PostgreSQL store.

use sqlx::FromRow;
use warden_core::privilege::Privilege;
use warden_core::role::Role;
use warden_core::types::DbId;

/// A `roles` row, before its privilege set is attached.
#[derive(Debug, FromRow)]
pub struct RoleRow {
    pub id: DbId,
    pub name: String,
}

/// A `privileges` row.
#[derive(Debug, FromRow)]
pub struct PrivilegeRow {
    pub id: DbId,
    pub name: String,
}

impl From<PrivilegeRow> for Privilege {
    fn from(row: PrivilegeRow) -> Self {
        Privilege {
            id: row.id,
            name: row.name,
        }
    }
}

/// One row of the role ⋈ privilege join used to materialize roles together
/// with their privilege sets in a single query. The privilege columns are
/// null for roles with no privileges.
#[derive(Debug, FromRow)]
pub struct RoleFlatRow {
    pub id: DbId,
    pub name: String,
    pub privilege_id: Option<DbId>,
    pub privilege_name: Option<String>,
}

/// Fold join rows into roles, preserving the row order of first appearance.
pub fn group_roles(rows: Vec<RoleFlatRow>) -> Vec<Role> {
    let mut roles: Vec<Role> = Vec::new();
    for row in rows {
        let role = match roles.iter_mut().find(|r| r.id == row.id) {
            Some(role) => role,
            None => {
                roles.push(Role {
                    id: row.id,
                    name: row.name,
                    privileges: Default::default(),
                });
                roles.last_mut().unwrap()
            }
        };
        if let (Some(id), Some(name)) = (row.privilege_id, row.privilege_name) {
            role.privileges.insert(Privilege { id, name });
        }
    }
    roles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(id: DbId, name: &str, privilege: Option<(DbId, &str)>) -> RoleFlatRow {
        RoleFlatRow {
            id,
            name: name.to_string(),
            privilege_id: privilege.map(|(id, _)| id),
            privilege_name: privilege.map(|(_, name)| name.to_string()),
        }
    }

    #[test]
    fn group_roles_collects_privilege_sets() {
        let rows = vec![
            flat(1, "admin", Some((10, "CAN_READ"))),
            flat(1, "admin", Some((11, "CAN_WRITE"))),
            flat(2, "viewer", None),
        ];
        let roles = group_roles(rows);
        assert_eq!(roles.len(), 2);
        assert_eq!(roles[0].privileges.len(), 2);
        assert!(roles[1].privileges.is_empty());
    }

    #[test]
    fn group_roles_preserves_row_order() {
        let rows = vec![flat(2, "bravo", None), flat(1, "alpha", None)];
        let ids: Vec<DbId> = group_roles(rows).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, [2, 1]);
    }
}
