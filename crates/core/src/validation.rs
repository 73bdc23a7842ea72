//! Write classification for incoming role and privilege payloads.
//!
//! Pure logic: identity-assertion and shape checks live here. Checks that
//! need stored state — privilege-reference resolution and name uniqueness —
//! belong to the storage boundary, which reports them as conflicts.

use crate::error::CoreError;
use crate::privilege::PrivilegeInput;
use crate::role::RoleInput;
use crate::types::DbId;

fn require_name(name: Option<&str>, entity: &str) -> Result<String, CoreError> {
    match name {
        Some(n) if !n.is_empty() => Ok(n.to_string()),
        _ => Err(CoreError::Validation(format!("{entity} name is required"))),
    }
}

fn reject_client_id(id: Option<DbId>, entity: &str) -> Result<(), CoreError> {
    if id.is_some() {
        return Err(CoreError::Conflict(format!(
            "{entity} id is assigned by the server"
        )));
    }
    Ok(())
}

/// Classify a role creation payload.
///
/// A client-supplied id is rejected before the name is inspected, matching
/// the precedence of the original service: asserting server-owned identity is
/// a conflict even when the rest of the payload is malformed.
pub fn validate_role_create(input: &RoleInput) -> Result<String, CoreError> {
    reject_client_id(input.id, "role")?;
    require_name(input.name.as_deref(), "role")
}

/// Classify a role update payload, returning the body id and name.
pub fn validate_role_update(input: &RoleInput) -> Result<(DbId, String), CoreError> {
    let name = require_name(input.name.as_deref(), "role")?;
    let id = input
        .id
        .ok_or_else(|| CoreError::Validation("role id is required".to_string()))?;
    Ok((id, name))
}

/// Classify a privilege creation payload.
pub fn validate_privilege_create(input: &PrivilegeInput) -> Result<String, CoreError> {
    reject_client_id(input.id, "privilege")?;
    require_name(input.name.as_deref(), "privilege")
}

/// Classify a privilege update payload, returning the body id and name.
pub fn validate_privilege_update(input: &PrivilegeInput) -> Result<(DbId, String), CoreError> {
    let name = require_name(input.name.as_deref(), "privilege")?;
    let id = input
        .id
        .ok_or_else(|| CoreError::Validation("privilege id is required".to_string()))?;
    Ok((id, name))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn role_input(id: Option<DbId>, name: Option<&str>) -> RoleInput {
        RoleInput {
            id,
            name: name.map(str::to_string),
            privileges: Vec::new(),
        }
    }

    #[test]
    fn create_with_valid_name_passes() {
        let name = validate_role_create(&role_input(None, Some("admin"))).unwrap();
        assert_eq!(name, "admin");
    }

    #[test]
    fn create_with_client_supplied_id_is_a_conflict() {
        let outcome = validate_role_create(&role_input(Some(5), Some("admin")));
        assert_matches!(outcome, Err(CoreError::Conflict(_)));
    }

    #[test]
    fn create_id_conflict_takes_precedence_over_missing_name() {
        let outcome = validate_role_create(&role_input(Some(5), None));
        assert_matches!(outcome, Err(CoreError::Conflict(_)));
    }

    #[test]
    fn create_with_missing_name_fails_validation() {
        let outcome = validate_role_create(&role_input(None, None));
        assert_matches!(outcome, Err(CoreError::Validation(_)));
    }

    #[test]
    fn create_with_empty_name_fails_validation() {
        let outcome = validate_role_create(&role_input(None, Some("")));
        assert_matches!(outcome, Err(CoreError::Validation(_)));
    }

    #[test]
    fn create_preserves_embedded_spaces() {
        let name = validate_role_create(&role_input(None, Some("content editor"))).unwrap();
        assert_eq!(name, "content editor");
    }

    #[test]
    fn update_with_id_and_name_passes() {
        let (id, name) = validate_role_update(&role_input(Some(3), Some("editor"))).unwrap();
        assert_eq!(id, 3);
        assert_eq!(name, "editor");
    }

    #[test]
    fn update_with_missing_name_fails_validation() {
        let outcome = validate_role_update(&role_input(Some(3), None));
        assert_matches!(outcome, Err(CoreError::Validation(_)));
    }

    #[test]
    fn update_with_missing_id_fails_validation() {
        let outcome = validate_role_update(&role_input(None, Some("editor")));
        assert_matches!(outcome, Err(CoreError::Validation(_)));
    }

    #[test]
    fn privilege_create_mirrors_role_classification() {
        let ok = validate_privilege_create(&PrivilegeInput {
            id: None,
            name: Some("CAN_WRITE".to_string()),
        });
        assert_eq!(ok.unwrap(), "CAN_WRITE");

        let conflict = validate_privilege_create(&PrivilegeInput {
            id: Some(9),
            name: Some("CAN_WRITE".to_string()),
        });
        assert_matches!(conflict, Err(CoreError::Conflict(_)));
    }
}
