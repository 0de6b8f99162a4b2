//! Error types for the index and its driver.

use std::collections::TryReserveError;

/// Errors surfaced by [`AvlTree::insert`](crate::AvlTree::insert) and the
/// [`driver`](crate::driver) functions.
///
/// A missing key is not an error: lookups return `Option`.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// Allocating storage for a new key failed. The tree is unchanged.
    #[error("out of memory while inserting key: {0}")]
    OutOfMemory(#[from] TryReserveError),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IndexError>;
