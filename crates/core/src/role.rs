use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::privilege::{Privilege, PrivilegeRef};
use crate::types::DbId;

/// A persisted role: a named grant holding a set of persisted privileges.
///
/// Equality is field-wise; the privilege set compares order-insensitively and
/// holds no duplicates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Role {
    pub id: DbId,
    pub name: String,
    pub privileges: HashSet<Privilege>,
}

/// Full-resource role representation as received on POST and PUT.
///
/// Fields are optional at the serde layer so absent and null values reach the
/// write classifier instead of failing deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleInput {
    pub id: Option<DbId>,
    pub name: Option<String>,
    #[serde(default)]
    pub privileges: Vec<PrivilegeRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn privilege(id: DbId, name: &str) -> Privilege {
        Privilege {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn role_equality_ignores_privilege_order() {
        let a = Role {
            id: 1,
            name: "admin".to_string(),
            privileges: [privilege(1, "read"), privilege(2, "write")].into(),
        };
        let b = Role {
            id: 1,
            name: "admin".to_string(),
            privileges: [privilege(2, "write"), privilege(1, "read")].into(),
        };
        assert_eq!(a, b);
    }

    #[test]
    fn roles_with_different_privileges_are_not_equal() {
        let a = Role {
            id: 1,
            name: "admin".to_string(),
            privileges: [privilege(1, "read")].into(),
        };
        let b = Role {
            id: 1,
            name: "admin".to_string(),
            privileges: HashSet::new(),
        };
        assert_ne!(a, b);
    }

    #[test]
    fn privilege_set_deduplicates_by_identity() {
        let set: HashSet<Privilege> = [privilege(1, "read"), privilege(1, "read")].into();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn role_input_accepts_null_fields() {
        let input: RoleInput =
            serde_json::from_str(r#"{"id": null, "name": null, "privileges": []}"#).unwrap();
        assert!(input.id.is_none());
        assert!(input.name.is_none());
        assert!(input.privileges.is_empty());
    }

    #[test]
    fn role_input_defaults_missing_privileges_to_empty() {
        let input: RoleInput = serde_json::from_str(r#"{"name": "viewer"}"#).unwrap();
        assert!(input.privileges.is_empty());
    }
}
