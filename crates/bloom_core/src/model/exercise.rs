//! Guided exercise catalog and completion record.
//!
//! # Responsibility
//! - Define the four exercise kinds and their static guidance content.
//! - Define the immutable `ExerciseCompletion` record.
//!
//! # Invariants
//! - `helpfulness` is always within `HELPFULNESS_MIN..=HELPFULNESS_MAX`.

use super::EntryId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const HELPFULNESS_MIN: u8 = 1;
pub const HELPFULNESS_MAX: u8 = 5;

/// Kind of micro-exercise a user can complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    Breathing,
    Grounding,
    Gratitude,
    Reframing,
}

/// Static guidance content shown while running an exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExerciseGuide {
    pub title: &'static str,
    pub duration_secs: u32,
    pub description: &'static str,
    pub steps: &'static [&'static str],
}

const BREATHING_GUIDE: ExerciseGuide = ExerciseGuide {
    title: "Box Breathing",
    duration_secs: 60,
    description: "Calm your nervous system with rhythmic breathing",
    steps: &[
        "Breathe in for 4 seconds",
        "Hold for 4 seconds",
        "Breathe out for 4 seconds",
        "Hold for 4 seconds",
    ],
};

const GROUNDING_GUIDE: ExerciseGuide = ExerciseGuide {
    title: "5-4-3-2-1 Grounding",
    duration_secs: 90,
    description: "Connect with your senses to anchor yourself",
    steps: &[
        "Name 5 things you see",
        "Name 4 things you can touch",
        "Name 3 things you hear",
        "Name 2 things you smell",
        "Name 1 thing you taste",
    ],
};

const GRATITUDE_GUIDE: ExerciseGuide = ExerciseGuide {
    title: "Gratitude Reflection",
    duration_secs: 45,
    description: "Shift focus to positive experiences",
    steps: &[
        "Think of someone who helped you",
        "Recall a small joy from today",
        "Appreciate something about yourself",
    ],
};

const REFRAMING_GUIDE: ExerciseGuide = ExerciseGuide {
    title: "Thought Reframing",
    duration_secs: 60,
    description: "Challenge unhelpful thought patterns",
    steps: &[
        "Identify the negative thought",
        "Find evidence against it",
        "Create a balanced perspective",
    ],
};

impl ExerciseKind {
    pub const ALL: [ExerciseKind; 4] = [
        ExerciseKind::Breathing,
        ExerciseKind::Grounding,
        ExerciseKind::Gratitude,
        ExerciseKind::Reframing,
    ];

    /// Stable persisted identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Breathing => "breathing",
            Self::Grounding => "grounding",
            Self::Gratitude => "gratitude",
            Self::Reframing => "reframing",
        }
    }

    pub fn guide(self) -> &'static ExerciseGuide {
        match self {
            Self::Breathing => &BREATHING_GUIDE,
            Self::Grounding => &GROUNDING_GUIDE,
            Self::Gratitude => &GRATITUDE_GUIDE,
            Self::Reframing => &REFRAMING_GUIDE,
        }
    }
}

impl Display for ExerciseKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when an exercise string is outside the fixed catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownExercise(pub String);

impl Display for UnknownExercise {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown exercise `{}`", self.0)
    }
}

impl Error for UnknownExercise {}

impl FromStr for ExerciseKind {
    type Err = UnknownExercise;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ExerciseKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| UnknownExercise(value.to_string()))
    }
}

/// Validates a raw helpfulness rating.
///
/// Returns `None` when `value` falls outside `1..=5`.
pub fn parse_helpfulness(value: i64) -> Option<u8> {
    u8::try_from(value)
        .ok()
        .filter(|rating| (HELPFULNESS_MIN..=HELPFULNESS_MAX).contains(rating))
}

/// One finished exercise with the user's helpfulness rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseCompletion {
    pub id: EntryId,
    pub timestamp: DateTime<Utc>,
    pub exercise_type: ExerciseKind,
    pub helpfulness: u8,
}

impl ExerciseCompletion {
    /// Creates a completion record.
    ///
    /// Callers validate `helpfulness` with [`parse_helpfulness`] first.
    pub fn new(timestamp: DateTime<Utc>, exercise_type: ExerciseKind, helpfulness: u8) -> Self {
        Self {
            id: EntryId::generate(),
            timestamp,
            exercise_type,
            helpfulness,
        }
    }
}
