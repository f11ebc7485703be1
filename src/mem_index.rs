//! In-Memory Index
//!
//! The search structure the engine serves lookups from: an exact-match
//! mapping from raw key bytes to value positions. It is populated once during
//! engine init and never mutated while serving, so concurrent `search` calls
//! need no locking.
//!
//! The structure is a seam: anything supporting `insert` and exact `search`
//! works here. A `HashMap` is used because point lookups are the only query;
//! a sorted array or prefix trie would slot in behind the same interface.

use std::collections::HashMap;

use crate::page::Pos;

/// Exact-match index from key bytes to value positions
#[derive(Default)]
pub struct MemIndex {
    entries: HashMap<Vec<u8>, Pos>,
}

impl MemIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key → position mapping (build/init phase only)
    pub fn insert(&mut self, key: Vec<u8>, pos: Pos) {
        self.entries.insert(key, pos);
    }

    /// Exact-match lookup
    pub fn search(&self, key: &[u8]) -> Option<Pos> {
        self.entries.get(key).copied()
    }

    /// Number of indexed keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
