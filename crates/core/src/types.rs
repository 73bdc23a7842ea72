/// All persisted primary keys are 64-bit integers (PostgreSQL BIGSERIAL).
/// Identifiers are server-assigned, strictly positive, and immutable.
pub type DbId = i64;
