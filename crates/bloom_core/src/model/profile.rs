//! Profile singleton and achievement set.
//!
//! # Responsibility
//! - Hold derived per-installation state: streak, last check-in date and
//!   unlocked achievements.
//! - Hold user preferences (display name, reminder settings).
//!
//! # Invariants
//! - `last_check_in_date` is a calendar date, never an instant.
//! - `AchievementSet` exposes no removal API; unlocks are permanent.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// Milestone identifiers. Declaration order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    First,
    Week,
    Grateful,
    Month,
    Zen,
}

impl Achievement {
    pub const ALL: [Achievement; 5] = [
        Achievement::First,
        Achievement::Week,
        Achievement::Grateful,
        Achievement::Month,
        Achievement::Zen,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Week => "week",
            Self::Grateful => "grateful",
            Self::Month => "month",
            Self::Zen => "zen",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::First => "First Bloom",
            Self::Week => "Week Warrior",
            Self::Grateful => "Grateful Heart",
            Self::Month => "Monthly Master",
            Self::Zen => "Zen Master",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::First => "Complete your first check-in",
            Self::Week => "7 day streak",
            Self::Grateful => "10 gratitude entries",
            Self::Month => "30 check-ins",
            Self::Zen => "Complete 20 exercises",
        }
    }
}

impl Display for Achievement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grow-only set of unlocked achievements.
///
/// Serialized as an array in display order, which keeps re-encoding stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AchievementSet(BTreeSet<Achievement>);

impl AchievementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unlocks `achievement`. Returns `true` when it was newly added.
    pub fn unlock(&mut self, achievement: Achievement) -> bool {
        self.0.insert(achievement)
    }

    pub fn contains(&self, achievement: Achievement) -> bool {
        self.0.contains(&achievement)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates unlocked achievements in display order.
    pub fn iter(&self) -> impl Iterator<Item = Achievement> + '_ {
        self.0.iter().copied()
    }

    /// Returns `true` when every achievement in `self` is also in `other`.
    pub fn is_subset(&self, other: &AchievementSet) -> bool {
        self.0.is_subset(&other.0)
    }
}

impl FromIterator<Achievement> for AchievementSet {
    fn from_iter<T: IntoIterator<Item = Achievement>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Daily reminder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreference {
    #[serde(with = "hour_minute")]
    pub reminder_time: NaiveTime,
    #[serde(rename = "notificationsEnabled")]
    pub enabled: bool,
}

impl NotificationPreference {
    pub fn default_reminder_time() -> NaiveTime {
        NaiveTime::from_hms_opt(20, 0, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl Default for NotificationPreference {
    fn default() -> Self {
        Self {
            reminder_time: Self::default_reminder_time(),
            enabled: false,
        }
    }
}

/// Per-installation profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    #[serde(rename = "name")]
    pub display_name: Option<String>,
    pub streak_count: u32,
    #[serde(rename = "lastCheckIn")]
    pub last_check_in_date: Option<NaiveDate>,
    #[serde(rename = "preferences")]
    pub notification_preference: NotificationPreference,
    pub achievements: AchievementSet,
}

/// `HH:MM` encoding for reminder times.
mod hour_minute {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(value: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::{Achievement, AchievementSet, NotificationPreference, Profile};
    use chrono::NaiveTime;

    #[test]
    fn unlock_reports_only_new_achievements() {
        let mut set = AchievementSet::new();
        assert!(set.unlock(Achievement::Week));
        assert!(!set.unlock(Achievement::Week));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn achievements_iterate_in_display_order() {
        let set: AchievementSet = [Achievement::Zen, Achievement::First, Achievement::Month]
            .into_iter()
            .collect();
        let order: Vec<_> = set.iter().collect();
        assert_eq!(
            order,
            vec![Achievement::First, Achievement::Month, Achievement::Zen]
        );
    }

    #[test]
    fn default_reminder_is_eight_pm_and_disabled() {
        let pref = NotificationPreference::default();
        assert_eq!(pref.reminder_time, NaiveTime::from_hms_opt(20, 0, 0).unwrap());
        assert!(!pref.enabled);
    }

    #[test]
    fn profile_serializes_with_stable_field_names() {
        let profile = Profile::default();
        let value = serde_json::to_value(&profile).expect("profile should serialize");
        assert_eq!(
            value,
            serde_json::json!({
                "name": null,
                "streakCount": 0,
                "lastCheckIn": null,
                "preferences": { "reminderTime": "20:00", "notificationsEnabled": false },
                "achievements": []
            })
        );
    }

    #[test]
    fn profile_tolerates_missing_fields() {
        let profile: Profile = serde_json::from_str(r#"{"streakCount": 3}"#).expect("partial profile should parse");
        assert_eq!(profile.streak_count, 3);
        assert!(profile.achievements.is_empty());
    }
}
