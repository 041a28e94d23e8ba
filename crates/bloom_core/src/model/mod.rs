//! Journal domain model.
//!
//! # Responsibility
//! - Define the event records (moods, gratitudes, exercise completions).
//! - Define the profile singleton and the persisted `Snapshot`.
//!
//! # Invariants
//! - Event records are immutable once created and identified by `EntryId`.
//! - Event logs expose newest entries first.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod event_log;
pub mod exercise;
pub mod gratitude;
pub mod mood;
pub mod profile;
pub mod snapshot;

/// Unique, time-ordered identifier of one journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Generates a fresh UUIDv7 id.
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Display for EntryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
