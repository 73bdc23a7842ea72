use crate::types::DbId;

/// Domain-level error taxonomy.
///
/// Every failed operation classifies into exactly one variant; the api crate
/// maps each variant to a fixed HTTP status and never re-classifies an
/// outcome on the way out.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CoreError {
    /// The referenced resource does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// The requested page index lies beyond the last available page.
    #[error("page {page} is out of range")]
    PageOutOfRange { page: i64 },

    /// Structurally malformed client input, independent of stored state.
    #[error("{0}")]
    Validation(String),

    /// Well-formed input that violates a uniqueness or referential rule, or
    /// asserts state the server controls.
    #[error("{0}")]
    Conflict(String),

    /// An internal fault. Details are logged, never returned to the caller.
    #[error("{0}")]
    Internal(String),
}
