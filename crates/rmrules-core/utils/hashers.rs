//! Hash collection constructors with consistent cross-platform behavior
//!
//! ahash-backed maps and sets for the candidate index and assumption sets,
//! with `DoS` resistance via random seeds. Handles the `nostd` vs std
//! `HashMap` selection in one place.

use ahash::RandomState;

#[cfg(feature = "nostd")]
use hashbrown::{HashMap, HashSet};
#[cfg(not(feature = "nostd"))]
use std::collections::{HashMap, HashSet};

/// ahash-backed map used throughout the crate
pub type Map<K, V> = HashMap<K, V, RandomState>;

/// ahash-backed set used throughout the crate
pub type Set<T> = HashSet<T, RandomState>;

/// Create a new `HashMap` with the crate's optimized hasher
#[must_use]
pub fn create_hash_map<K, V>() -> Map<K, V> {
    HashMap::with_hasher(RandomState::new())
}

/// Create a new `HashSet` with the crate's optimized hasher
#[must_use]
pub fn create_hash_set<T>() -> Set<T> {
    HashSet::with_hasher(RandomState::new())
}
