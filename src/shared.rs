//! Readers-writer wrapper for sharing one index between threads.
//!
//! [`AvlTree`] has no locking of its own: inserts take `&mut self` and
//! rotate nodes in place. `SharedIndex` puts the tree behind a
//! `parking_lot::RwLock`, so any number of lookups can run at once while an
//! insert (including its rotations) runs alone.

use parking_lot::{RwLock, RwLockReadGuard};

use crate::{AvlTree, Config, Result};

/// A thread-safe handle to an [`AvlTree`].
pub struct SharedIndex {
    inner: RwLock<AvlTree>,
}

impl SharedIndex {
    /// Create an empty index with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an empty index with the given configuration.
    pub fn with_config(config: Config) -> Self {
        Self::from_tree(AvlTree::with_config(config))
    }

    /// Wrap an already-populated tree.
    pub fn from_tree(tree: AvlTree) -> Self {
        Self {
            inner: RwLock::new(tree),
        }
    }

    /// Insert a key under the write lock.
    pub fn insert(&self, key: impl AsRef<str>) -> Result<bool> {
        self.inner.write().insert(key.as_ref())
    }

    /// Look up a key, returning a copy of the stored key.
    pub fn retrieve(&self, key: impl AsRef<str>) -> Option<String> {
        self.inner.read().retrieve(key.as_ref()).map(str::to_owned)
    }

    /// Check if a key is present.
    pub fn contains(&self, key: impl AsRef<str>) -> bool {
        self.inner.read().contains(key.as_ref())
    }

    /// Get the number of keys.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Get the height of the underlying tree.
    pub fn height(&self) -> u32 {
        self.inner.read().height()
    }

    /// Snapshot of all keys in ascending order.
    pub fn keys(&self) -> Vec<String> {
        self.inner.read().iter().map(str::to_owned).collect()
    }

    /// Hold the read lock for several lookups or a traversal.
    pub fn read(&self) -> RwLockReadGuard<'_, AvlTree> {
        self.inner.read()
    }

    /// Unwrap the tree.
    pub fn into_inner(self) -> AvlTree {
        self.inner.into_inner()
    }
}

impl Default for SharedIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl From<AvlTree> for SharedIndex {
    fn from(tree: AvlTree) -> Self {
        Self::from_tree(tree)
    }
}
