//! Set of block hashes.

use shared_types::Hash;
use std::collections::HashSet;

/// A set of block hashes with O(1) membership.
///
/// Iteration order is unspecified; callers must not depend on it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockHashSet {
    inner: HashSet<Hash>,
}

impl BlockHashSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a hash. Idempotent.
    pub fn add(&mut self, hash: Hash) {
        self.inner.insert(hash);
    }

    /// Removes a hash. Idempotent.
    pub fn del(&mut self, hash: &Hash) {
        self.inner.remove(hash);
    }

    pub fn has(&self, hash: &Hash) -> bool {
        self.inner.contains(hash)
    }

    /// All hashes, in unspecified order.
    pub fn collect(&self) -> Vec<Hash> {
        self.inner.iter().copied().collect()
    }

    /// Unions `other` into `self`.
    pub fn merge(&mut self, other: &BlockHashSet) {
        self.inner.extend(other.inner.iter().copied());
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hash> {
        self.inner.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl FromIterator<Hash> for BlockHashSet {
    fn from_iter<I: IntoIterator<Item = Hash>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}
