//! Mood check-in model.
//!
//! # Responsibility
//! - Define the fixed mood vocabulary accepted by check-ins.
//! - Define the immutable `MoodEntry` record stored in the mood log.
//!
//! # Invariants
//! - The mood vocabulary has exactly eight tags; string forms are stable
//!   because they are persisted.
//! - A blank reflection is stored as `None`, never as an empty string.

use super::EntryId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Mood tag selected during a check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Joyful,
    Calm,
    Neutral,
    Anxious,
    Sad,
    Angry,
    Tired,
    Energized,
}

impl Mood {
    /// All moods in picker order.
    pub const ALL: [Mood; 8] = [
        Mood::Joyful,
        Mood::Calm,
        Mood::Neutral,
        Mood::Anxious,
        Mood::Sad,
        Mood::Angry,
        Mood::Tired,
        Mood::Energized,
    ];

    /// Stable persisted identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Joyful => "joyful",
            Self::Calm => "calm",
            Self::Neutral => "neutral",
            Self::Anxious => "anxious",
            Self::Sad => "sad",
            Self::Angry => "angry",
            Self::Tired => "tired",
            Self::Energized => "energized",
        }
    }

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Joyful => "Joyful",
            Self::Calm => "Calm",
            Self::Neutral => "Neutral",
            Self::Anxious => "Anxious",
            Self::Sad => "Sad",
            Self::Angry => "Angry",
            Self::Tired => "Tired",
            Self::Energized => "Energized",
        }
    }
}

impl Display for Mood {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a mood string is outside the fixed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMood(pub String);

impl Display for UnknownMood {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown mood `{}`", self.0)
    }
}

impl Error for UnknownMood {}

impl FromStr for Mood {
    type Err = UnknownMood;

    /// Parses a persisted mood tag. Matching is exact.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str() == value)
            .ok_or_else(|| UnknownMood(value.to_string()))
    }
}

/// One recorded check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: EntryId,
    pub timestamp: DateTime<Utc>,
    pub mood: Mood,
    pub reflection: Option<String>,
}

impl MoodEntry {
    /// Creates a check-in entry stamped at `timestamp`.
    pub fn new(timestamp: DateTime<Utc>, mood: Mood, reflection: Option<&str>) -> Self {
        Self {
            id: EntryId::generate(),
            timestamp,
            mood,
            reflection: reflection
                .filter(|text| !text.trim().is_empty())
                .map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Mood, MoodEntry};
    use chrono::Utc;

    #[test]
    fn parse_accepts_every_tag() {
        for mood in Mood::ALL {
            let parsed = mood.as_str().parse::<Mood>().expect("catalog tag should parse");
            assert_eq!(parsed, mood);
        }
    }

    #[test]
    fn parse_requires_exact_tag() {
        for input in [" anxious", "anxious ", "Anxious", "ANXIOUS", ""] {
            let err = input.parse::<Mood>().unwrap_err();
            assert_eq!(err.0, input);
        }
    }

    #[test]
    fn parse_rejects_unknown_tag() {
        let err = "ecstatic".parse::<Mood>().unwrap_err();
        assert_eq!(err.0, "ecstatic");
    }

    #[test]
    fn blank_reflection_is_dropped() {
        let entry = MoodEntry::new(Utc::now(), Mood::Calm, Some("   "));
        assert!(entry.reflection.is_none());

        let entry = MoodEntry::new(Utc::now(), Mood::Calm, Some("slept well"));
        assert_eq!(entry.reflection.as_deref(), Some("slept well"));
    }
}
