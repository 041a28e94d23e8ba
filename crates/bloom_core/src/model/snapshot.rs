//! Snapshot: the unit of persistence.
//!
//! # Invariants
//! - A snapshot is always read and written whole.
//! - Field names are part of the persisted format and must stay stable.

use super::event_log::EventLog;
use super::exercise::ExerciseCompletion;
use super::gratitude::GratitudeEntry;
use super::mood::MoodEntry;
use super::profile::Profile;
use serde::{Deserialize, Serialize};

/// Complete persisted state: the three event logs plus the profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub moods: EventLog<MoodEntry>,
    pub gratitudes: EventLog<GratitudeEntry>,
    pub exercises: EventLog<ExerciseCompletion>,
    pub profile: Profile,
}

impl Snapshot {
    /// State of a fresh installation.
    pub fn empty() -> Self {
        Self::default()
    }
}
