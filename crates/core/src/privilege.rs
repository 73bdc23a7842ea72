use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// A persisted privilege.
///
/// `Eq` and `Hash` are derived together so equal privileges hash identically,
/// which membership in a role's privilege set relies on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Privilege {
    pub id: DbId,
    pub name: String,
}

/// A privilege reference carried inside a role payload.
///
/// Only a reference to an already-persisted privilege is acceptable; a null
/// id, or an id with no persisted record behind it, is a conflict regardless
/// of whether the name would also fail its own shape check.
#[derive(Debug, Clone, Deserialize)]
pub struct PrivilegeRef {
    pub id: Option<DbId>,
    pub name: Option<String>,
}

/// Full-resource privilege representation as received on POST and PUT.
///
/// Fields are optional at the serde layer so absent and null values reach the
/// write classifier instead of failing deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct PrivilegeInput {
    pub id: Option<DbId>,
    pub name: Option<String>,
}
