//! Persistence layer.
//!
//! # Responsibility
//! - `kv_repo`: durable key-value byte store (SQLite or in-memory).
//! - `snapshot_repo`: whole-snapshot load/save on top of the byte store.
//!
//! # Invariants
//! - Only the session service calls `SnapshotRepository::save`.
//! - Persistence failures are returned as values, never panics.

pub mod kv_repo;
pub mod snapshot_repo;
