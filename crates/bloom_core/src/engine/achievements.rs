//! Achievement unlock rules.
//!
//! # Invariants
//! - Rules only ever add to `Profile::achievements`.
//! - Re-applying the rules to the same inputs is a no-op.

use crate::model::exercise::ExerciseCompletion;
use crate::model::gratitude::GratitudeEntry;
use crate::model::mood::MoodEntry;
use crate::model::profile::{Achievement, Profile};

/// Counters the unlock rules are evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Progress {
    moods: usize,
    gratitudes: usize,
    exercises: usize,
    streak: u32,
}

struct AchievementRule {
    id: Achievement,
    unlocked: fn(&Progress) -> bool,
}

const ACHIEVEMENT_RULES: &[AchievementRule] = &[
    AchievementRule {
        id: Achievement::First,
        unlocked: first_check_in,
    },
    AchievementRule {
        id: Achievement::Week,
        unlocked: week_streak,
    },
    AchievementRule {
        id: Achievement::Grateful,
        unlocked: ten_gratitudes,
    },
    AchievementRule {
        id: Achievement::Month,
        unlocked: thirty_check_ins,
    },
    AchievementRule {
        id: Achievement::Zen,
        unlocked: twenty_exercises,
    },
];

fn first_check_in(p: &Progress) -> bool {
    p.moods >= 1
}

fn week_streak(p: &Progress) -> bool {
    p.streak >= 7
}

fn ten_gratitudes(p: &Progress) -> bool {
    p.gratitudes >= 10
}

fn thirty_check_ins(p: &Progress) -> bool {
    p.moods >= 30
}

fn twenty_exercises(p: &Progress) -> bool {
    p.exercises >= 20
}

/// Returns `true` when the rule for `achievement` holds for `progress`.
fn is_earned(achievement: Achievement, progress: &Progress) -> bool {
    ACHIEVEMENT_RULES
        .iter()
        .find(|rule| rule.id == achievement)
        .is_some_and(|rule| (rule.unlocked)(progress))
}

/// Unlocks every achievement whose rule holds for the given event logs.
pub fn apply_achievements(
    profile: &Profile,
    moods: &[MoodEntry],
    gratitudes: &[GratitudeEntry],
    exercises: &[ExerciseCompletion],
) -> Profile {
    let progress = Progress {
        moods: moods.len(),
        gratitudes: gratitudes.len(),
        exercises: exercises.len(),
        streak: profile.streak_count,
    };

    let mut next = profile.clone();
    for id in Achievement::ALL {
        if is_earned(id, &progress) {
            next.achievements.unlock(id);
        }
    }
    next
}

/// Achievements present in `after` but not in `before`, in display order.
pub fn newly_unlocked(before: &Profile, after: &Profile) -> Vec<Achievement> {
    after
        .achievements
        .iter()
        .filter(|id| !before.achievements.contains(*id))
        .collect()
}
