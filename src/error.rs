//! Error types returned by the table, its chains and its configuration.

use thiserror::Error;

/// Failure of a keyed table operation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// `get`, `get_mut` or `delete` was called with a key that has no entry.
    #[error("key not found")]
    KeyNotFound,
}

/// A chain was asked to delete a link that does not name one of its live
/// entries.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("entry not present in chain")]
pub struct EntryNotPresent;

/// Rejected table configuration.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("bucket count must be greater than zero")]
    ZeroBuckets,
}
