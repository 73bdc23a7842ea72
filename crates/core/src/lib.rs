//! Domain model and request-classification logic for the warden service.
//!
//! Pure logic only: no I/O, no web types, no database types. The `db` and
//! `api` crates depend on this crate, never the reverse.

pub mod error;
pub mod privilege;
pub mod query;
pub mod role;
pub mod types;
pub mod validation;
