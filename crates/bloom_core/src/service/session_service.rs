//! Session facade: the single entry point for presentation callers.
//!
//! # Responsibility
//! - Own the in-memory `Snapshot` for the lifetime of the session.
//! - Validate command input, append events, run derived-state rules and
//!   persist the whole snapshot after every mutation.
//!
//! # Invariants
//! - Validation happens before any mutation; a rejected command leaves the
//!   snapshot untouched.
//! - The in-memory snapshot stays authoritative when a save fails; the
//!   failure is reported in `Committed::storage_warning`.
//! - Only this type calls `SnapshotRepository::save`.
//! - A stored record that could not be read at open is never overwritten.

use crate::clock::{Clock, SystemClock};
use crate::engine::achievements::{apply_achievements, newly_unlocked};
use crate::engine::insights::{garden_plants, insights, GardenPlant, Insights};
use crate::engine::recommend::recommend;
use crate::engine::streak::apply_check_in;
use crate::model::exercise::{parse_helpfulness, ExerciseCompletion, ExerciseKind};
use crate::model::gratitude::{filter_gratitude_items, GratitudeEntry, MAX_GRATITUDE_ITEMS};
use crate::model::mood::{Mood, MoodEntry};
use crate::model::profile::{NotificationPreference, Profile};
use crate::model::snapshot::Snapshot;
use crate::repo::kv_repo::KvRepository;
use crate::repo::snapshot_repo::{SnapshotRepository, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Caller-input validation failure. Nothing was mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    InvalidMoodKind(String),
    /// Unknown exercise type or a helpfulness rating outside 1..=5.
    InvalidExerciseRating { exercise: String, helpfulness: i64 },
    /// Every gratitude item was blank.
    EmptyGratitude,
    TooManyGratitudeItems { count: usize, max: usize },
}

impl SessionError {
    /// Short stable code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidMoodKind(_) => "invalid_mood_kind",
            Self::InvalidExerciseRating { .. } => "invalid_exercise_rating",
            Self::EmptyGratitude => "empty_gratitude",
            Self::TooManyGratitudeItems { .. } => "too_many_gratitude_items",
        }
    }
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMoodKind(value) => write!(f, "invalid mood kind: `{value}`"),
            Self::InvalidExerciseRating {
                exercise,
                helpfulness,
            } => write!(
                f,
                "invalid exercise rating: `{exercise}` rated {helpfulness}; expected 1..=5"
            ),
            Self::EmptyGratitude => write!(f, "gratitude entry has no non-blank items"),
            Self::TooManyGratitudeItems { count, max } => {
                write!(f, "gratitude entry has {count} items; at most {max} allowed")
            }
        }
    }
}

impl Error for SessionError {}

/// Result of an accepted command.
#[derive(Debug)]
pub struct Committed<T> {
    /// Value produced by the command.
    pub value: T,
    /// Set when the snapshot could not be persisted. The session keeps
    /// running on its in-memory state.
    pub storage_warning: Option<StoreError>,
}

impl<T> Committed<T> {
    pub fn is_durable(&self) -> bool {
        self.storage_warning.is_none()
    }
}

/// Owner of the journal state for one process.
pub struct Session<R: KvRepository, C: Clock = SystemClock> {
    store: SnapshotRepository<R>,
    clock: C,
    snapshot: Snapshot,
    open_warning: Option<StoreError>,
    durable: bool,
    /// Set when open could not read the store; cleared once a re-read shows
    /// there is no record to lose.
    unread_store: bool,
}

impl<R: KvRepository, C: Clock> Session<R, C> {
    /// Opens a session, loading the stored snapshot.
    ///
    /// Never fails: missing or corrupt data starts a fresh snapshot, and an
    /// unreadable store starts a fresh, non-durable session. The cause is kept
    /// in [`Session::open_warning`].
    ///
    /// After an unreadable open, the store is read again before the first
    /// save. If a record turns up, commands keep running in memory and report
    /// [`StoreError::UnreadRecord`] instead of replacing it.
    pub fn open(store: SnapshotRepository<R>, clock: C) -> Self {
        let (snapshot, open_warning) = match store.load() {
            Ok(Some(snapshot)) => (snapshot, None),
            Ok(None) => (Snapshot::empty(), None),
            Err(err) => (Snapshot::empty(), Some(err)),
        };
        let unread_store = matches!(open_warning, Some(StoreError::StorageUnavailable(_)));

        match &open_warning {
            None => info!(
                "event=session_open module=session status=ok key={} moods={} streak={}",
                store.key(),
                snapshot.moods.len(),
                snapshot.profile.streak_count
            ),
            Some(err) => warn!(
                "event=session_open module=session status=warn key={} error_code={} fallback=fresh_snapshot",
                store.key(),
                err.code()
            ),
        }

        Self {
            store,
            clock,
            snapshot,
            open_warning,
            durable: !unread_store,
            unread_store,
        }
    }

    /// Read-only view of the full state.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn profile(&self) -> &Profile {
        &self.snapshot.profile
    }

    /// Problem met while loading the stored snapshot, if any.
    pub fn open_warning(&self) -> Option<&StoreError> {
        self.open_warning.as_ref()
    }

    /// Whether the latest state is known to be persisted.
    pub fn is_durable(&self) -> bool {
        self.durable
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Records a mood check-in and updates the streak.
    pub fn record_mood(
        &mut self,
        mood: &str,
        reflection: Option<&str>,
    ) -> Result<Committed<MoodEntry>, SessionError> {
        let mood: Mood = mood
            .parse()
            .map_err(|_| self.reject(SessionError::InvalidMoodKind(mood.to_string())))?;

        let now = self.clock.now();
        let today = self.clock.calendar_date(now);
        let entry = MoodEntry::new(now, mood, reflection);

        let mut next = self.snapshot.clone();
        next.moods.record(entry.clone());
        next.profile = apply_check_in(&next.profile, today);
        self.unlock_achievements(&mut next);

        info!(
            "event=mood_recorded module=session status=ok mood={} streak={} has_reflection={}",
            entry.mood,
            next.profile.streak_count,
            entry.reflection.is_some()
        );
        Ok(self.commit(next, entry))
    }

    /// Records a gratitude entry from raw form input.
    ///
    /// Blank items are discarded; if none remain nothing is recorded and
    /// `EmptyGratitude` is returned.
    pub fn record_gratitude<S: AsRef<str>>(
        &mut self,
        items: &[S],
    ) -> Result<Committed<GratitudeEntry>, SessionError> {
        let filtered = filter_gratitude_items(items);
        if filtered.len() > MAX_GRATITUDE_ITEMS {
            return Err(self.reject(SessionError::TooManyGratitudeItems {
                count: filtered.len(),
                max: MAX_GRATITUDE_ITEMS,
            }));
        }
        let Some(entry) = GratitudeEntry::new(self.clock.now(), filtered) else {
            return Err(self.reject(SessionError::EmptyGratitude));
        };

        let mut next = self.snapshot.clone();
        next.gratitudes.record(entry.clone());
        self.unlock_achievements(&mut next);

        info!(
            "event=gratitude_recorded module=session status=ok items={} total={}",
            entry.items.len(),
            next.gratitudes.len()
        );
        Ok(self.commit(next, entry))
    }

    /// Records a completed exercise with its helpfulness rating.
    pub fn record_exercise(
        &mut self,
        exercise: &str,
        helpfulness: i64,
    ) -> Result<Committed<ExerciseCompletion>, SessionError> {
        let parsed = exercise
            .parse::<ExerciseKind>()
            .ok()
            .zip(parse_helpfulness(helpfulness));
        let Some((kind, rating)) = parsed else {
            return Err(self.reject(SessionError::InvalidExerciseRating {
                exercise: exercise.to_string(),
                helpfulness,
            }));
        };

        let entry = ExerciseCompletion::new(self.clock.now(), kind, rating);
        let mut next = self.snapshot.clone();
        next.exercises.record(entry.clone());
        self.unlock_achievements(&mut next);

        info!(
            "event=exercise_recorded module=session status=ok exercise={} helpfulness={} total={}",
            entry.exercise_type,
            entry.helpfulness,
            next.exercises.len()
        );
        Ok(self.commit(next, entry))
    }

    /// Sets or clears (blank input) the display name.
    pub fn set_display_name(&mut self, name: &str) -> Committed<Profile> {
        let trimmed = name.trim();
        let mut next = self.snapshot.clone();
        next.profile.display_name = (!trimmed.is_empty()).then(|| trimmed.to_string());

        info!(
            "event=profile_updated module=session status=ok field=display_name has_value={}",
            next.profile.display_name.is_some()
        );
        let profile = next.profile.clone();
        self.commit(next, profile)
    }

    pub fn set_notification_preference(
        &mut self,
        preference: NotificationPreference,
    ) -> Committed<Profile> {
        let mut next = self.snapshot.clone();
        next.profile.notification_preference = preference;

        info!(
            "event=profile_updated module=session status=ok field=notification_preference enabled={} reminder_time={}",
            preference.enabled,
            preference.reminder_time.format("%H:%M")
        );
        let profile = next.profile.clone();
        self.commit(next, profile)
    }

    /// Exercise suggested by the most recent mood.
    pub fn recommendation(&self) -> ExerciseKind {
        recommend(self.snapshot.moods.latest().map(|entry| entry.mood))
    }

    /// Whether the newest mood entry falls on today's calendar date.
    pub fn has_checked_in_today(&self) -> bool {
        self.snapshot.moods.latest().is_some_and(|entry| {
            self.clock.calendar_date(entry.timestamp) == self.clock.today()
        })
    }

    /// A fresh installation: no check-ins and no display name yet.
    pub fn needs_onboarding(&self) -> bool {
        self.snapshot.moods.is_empty() && self.snapshot.profile.display_name.is_none()
    }

    pub fn insights(&self) -> Insights {
        insights(&self.snapshot)
    }

    pub fn garden(&self) -> Vec<GardenPlant> {
        garden_plants(self.snapshot.profile.streak_count)
    }

    fn unlock_achievements(&self, next: &mut Snapshot) {
        let updated = apply_achievements(
            &next.profile,
            next.moods.as_slice(),
            next.gratitudes.as_slice(),
            next.exercises.as_slice(),
        );
        for id in newly_unlocked(&next.profile, &updated) {
            info!("event=achievement_unlocked module=session status=ok achievement={id}");
        }
        next.profile = updated;
    }

    fn reject(&self, err: SessionError) -> SessionError {
        info!(
            "event=command_rejected module=session status=error error_code={}",
            err.code()
        );
        err
    }

    /// Re-reads the store when open could not. Fails while a record exists
    /// that this session never loaded.
    fn check_unread_store(&mut self) -> Result<(), StoreError> {
        if !self.unread_store {
            return Ok(());
        }
        match self.store.load() {
            Ok(None) | Err(StoreError::CorruptSnapshot(_)) => {
                info!("event=store_recheck module=session status=ok record=absent");
                self.unread_store = false;
                Ok(())
            }
            Ok(Some(_)) => {
                warn!("event=store_recheck module=session status=warn record=present save=skipped");
                Err(StoreError::UnreadRecord)
            }
            Err(err) => Err(err),
        }
    }

    fn commit<T>(&mut self, next: Snapshot, value: T) -> Committed<T> {
        let storage_warning = match self.check_unread_store() {
            Ok(()) => self.store.save(&next).err(),
            Err(err) => Some(err),
        };
        if let Some(err) = &storage_warning {
            warn!(
                "event=snapshot_save module=session status=warn error_code={} in_memory=authoritative",
                err.code()
            );
        }
        self.durable = storage_warning.is_none();
        self.snapshot = next;
        Committed {
            value,
            storage_warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Session, SessionError};
    use crate::clock::FixedClock;
    use crate::repo::kv_repo::InMemoryKvRepository;
    use crate::repo::snapshot_repo::SnapshotRepository;
    use chrono::{Duration, TimeZone, Utc};

    fn session(kv: &InMemoryKvRepository) -> Session<&InMemoryKvRepository, FixedClock> {
        let clock = FixedClock::utc(Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap());
        Session::open(SnapshotRepository::new(kv), clock)
    }

    #[test]
    fn fresh_session_needs_onboarding_until_named() {
        let kv = InMemoryKvRepository::new();
        let mut session = session(&kv);
        assert!(session.needs_onboarding());
        session.set_display_name("  Sam ");
        assert!(!session.needs_onboarding());
        assert_eq!(session.profile().display_name.as_deref(), Some("Sam"));
    }

    #[test]
    fn blank_display_name_clears_it() {
        let kv = InMemoryKvRepository::new();
        let mut session = session(&kv);
        session.set_display_name("Sam");
        let committed = session.set_display_name("   ");
        assert!(committed.value.display_name.is_none());
    }

    #[test]
    fn checked_in_today_follows_calendar_date() {
        let kv = InMemoryKvRepository::new();
        let mut session = session(&kv);
        assert!(!session.has_checked_in_today());
        session.record_mood("calm", None).expect("valid mood");
        assert!(session.has_checked_in_today());
        session.clock().advance(Duration::days(1));
        assert!(!session.has_checked_in_today());
    }

    #[test]
    fn too_many_gratitude_items_are_rejected() {
        let kv = InMemoryKvRepository::new();
        let mut session = session(&kv);
        let err = session.record_gratitude(&["a", "b", "c", "d"]).unwrap_err();
        assert_eq!(err, SessionError::TooManyGratitudeItems { count: 4, max: 3 });
        assert!(session.snapshot().gratitudes.is_empty());
    }

    #[test]
    fn unknown_exercise_is_an_invalid_rating() {
        let kv = InMemoryKvRepository::new();
        let mut session = session(&kv);
        let err = session.record_exercise("yoga", 3).unwrap_err();
        assert_eq!(
            err,
            SessionError::InvalidExerciseRating {
                exercise: "yoga".to_string(),
                helpfulness: 3,
            }
        );
        assert_eq!(err.code(), "invalid_exercise_rating");
        assert!(session.snapshot().exercises.is_empty());
    }
}
