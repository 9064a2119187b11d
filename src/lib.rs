//! chained-hashtable: a single-owner hash table with a fixed number of
//! separately chained buckets.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small associative container whose cost model is easy to
//!   state: one hash, one bucket, one linear scan.
//! - Layers:
//!   - Chain<K, V>: the entries of one bucket as a doubly linked list
//!     stored in a `SlotMap`. Append and unlink are O(1); lookup scans
//!     from the head. Entries are identified by `Link` handles.
//!   - HashTable<K, V, S>: owns `bucket_count` chains, picks a chain with
//!     `hash(key) mod bucket_count` and delegates to it.
//!
//! Constraints
//! - Fixed bucket count: chosen at construction (default 8) and never
//!   changed. There is no rehash; a high load factor just means longer
//!   chains.
//! - Unique keys: the table checks its chain before appending, so every key
//!   appears in exactly one entry, in the chain at its bucket index.
//! - Every keyed operation touches exactly one chain.
//! - Single owner: reads take `&self`, mutations `&mut self`. No internal
//!   locking; the table is `Send`/`Sync` when its parameters are, so callers
//!   can put it behind their own lock.
//!
//! Update semantics
//! - `set` on a present key removes the old entry and appends a new one,
//!   so the key moves to the end of its chain. Enumeration order (bucket
//!   order, then chain order) is an artifact of chaining and is only
//!   stable while the table is not mutated.
//!
//! Errors
//! - `Error::KeyNotFound` from `get`, `get_mut` and `delete`.
//! - `EntryNotPresent` from `Chain::delete` for a dead link. The table only
//!   deletes links it has just found, so it never surfaces this.
//! - `ConfigError::ZeroBuckets` when asked for a table with no buckets.
//!
//! Hashing
//! - Keys are hashed through a `BuildHasher` owned by the table
//!   (default `hashbrown`'s `DefaultHashBuilder`). Borrowed lookups
//!   (`String` keys queried with `&str`) follow the usual `Borrow`
//!   contract: equal values must hash equally.
//!
//! Logging
//! - Emits `log` records: table construction at `debug`, each insert,
//!   update and delete at `trace` with its bucket index and chain length.

pub mod chain;
pub mod config;
pub mod error;
pub mod hash_table;
mod hash_table_proptest;

// Public surface
pub use chain::{Chain, Link};
pub use config::{TableConfig, DEFAULT_BUCKET_COUNT};
pub use error::{ConfigError, EntryNotPresent, Error};
pub use hash_table::HashTable;
