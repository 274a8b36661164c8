//! Utility modules shared across the analysis passes
//!
//! Error types and hashing helpers; nothing here carries analysis semantics.

pub mod errors;
pub mod hashers;

pub use errors::CoreError;
pub use hashers::{create_hash_map, create_hash_set};
