//! Core state and persistence engine for the Bloom wellness journal.
//! This crate is the single source of truth for journal invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod engine;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, CoreConfig};
pub use engine::achievements::apply_achievements;
pub use engine::insights::{GardenPlant, Insights};
pub use engine::recommend::recommend;
pub use engine::streak::apply_check_in;
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::event_log::EventLog;
pub use model::exercise::{ExerciseCompletion, ExerciseGuide, ExerciseKind};
pub use model::gratitude::GratitudeEntry;
pub use model::mood::{Mood, MoodEntry};
pub use model::profile::{Achievement, AchievementSet, NotificationPreference, Profile};
pub use model::snapshot::Snapshot;
pub use model::EntryId;
pub use repo::kv_repo::{InMemoryKvRepository, KvRepository, RepoError, SqliteKvRepository};
pub use repo::snapshot_repo::{SnapshotRepository, StoreError, DEFAULT_STORAGE_KEY};
pub use service::session_service::{Committed, Session, SessionError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
