//! Repository layer contracts and persistence implementations.
//!
//! # Responsibility
//! - Define the key/value persistence boundary used by search history.
//! - Define the read-only snapshot boundary to the external task store.
//!
//! # Invariants
//! - Repository errors are typed; callers decide whether to swallow them.
//! - Snapshot sources never hand out mutable access to entities.

pub mod kv_repo;
pub mod snapshot;
