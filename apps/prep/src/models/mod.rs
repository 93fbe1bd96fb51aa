//! Persisted data shapes and their normalization rules.

pub mod entry;
pub mod schema;
