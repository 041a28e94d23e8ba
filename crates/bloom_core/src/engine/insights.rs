//! Read-only summaries derived from a snapshot.
//!
//! # Responsibility
//! - Aggregate mood history for the insights view.
//! - Map the current streak to unlocked garden plants.

use crate::model::gratitude::GratitudeEntry;
use crate::model::mood::Mood;
use crate::model::snapshot::Snapshot;
use std::collections::BTreeMap;

/// Number of gratitude entries surfaced by [`Insights::recent_gratitudes`].
pub const RECENT_GRATITUDE_LIMIT: usize = 3;

/// Aggregated mood statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insights {
    pub total_check_ins: usize,
    /// Count per mood; moods never recorded are absent.
    pub mood_counts: BTreeMap<Mood, usize>,
    /// Most frequent mood with its count. Ties go to the mood seen most
    /// recently.
    pub top_mood: Option<(Mood, usize)>,
    /// Newest gratitude entries, newest first.
    pub recent_gratitudes: Vec<GratitudeEntry>,
}

/// Computes insights over the full snapshot.
pub fn insights(snapshot: &Snapshot) -> Insights {
    let mut mood_counts: BTreeMap<Mood, usize> = BTreeMap::new();
    // Moods in first-seen order while walking newest to oldest.
    let mut seen_order: Vec<Mood> = Vec::new();
    for entry in &snapshot.moods {
        let count = mood_counts.entry(entry.mood).or_insert(0);
        if *count == 0 {
            seen_order.push(entry.mood);
        }
        *count += 1;
    }

    let mut top_mood: Option<(Mood, usize)> = None;
    for mood in seen_order {
        let count = mood_counts[&mood];
        if top_mood.map_or(true, |(_, best)| count > best) {
            top_mood = Some((mood, count));
        }
    }

    Insights {
        total_check_ins: snapshot.moods.len(),
        mood_counts,
        top_mood,
        recent_gratitudes: snapshot
            .gratitudes
            .iter()
            .take(RECENT_GRATITUDE_LIMIT)
            .cloned()
            .collect(),
    }
}

/// Plants that appear in the garden as the streak grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GardenPlant {
    Sprout,
    Tulip,
    Tree,
    Hibiscus,
}

impl GardenPlant {
    /// Streak length at which the plant appears.
    pub fn required_streak(self) -> u32 {
        match self {
            Self::Sprout => 1,
            Self::Tulip => 3,
            Self::Tree => 7,
            Self::Hibiscus => 14,
        }
    }
}

/// Plants visible for `streak`, in growth order.
pub fn garden_plants(streak: u32) -> Vec<GardenPlant> {
    [
        GardenPlant::Sprout,
        GardenPlant::Tulip,
        GardenPlant::Tree,
        GardenPlant::Hibiscus,
    ]
    .into_iter()
    .filter(|plant| streak >= plant.required_streak())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::{garden_plants, insights, GardenPlant};
    use crate::model::gratitude::GratitudeEntry;
    use crate::model::mood::{Mood, MoodEntry};
    use crate::model::snapshot::Snapshot;
    use chrono::Utc;

    fn record_moods(snapshot: &mut Snapshot, moods: &[Mood]) {
        for mood in moods {
            snapshot.moods.record(MoodEntry::new(Utc::now(), *mood, None));
        }
    }

    #[test]
    fn empty_snapshot_has_no_top_mood() {
        let summary = insights(&Snapshot::empty());
        assert_eq!(summary.total_check_ins, 0);
        assert!(summary.mood_counts.is_empty());
        assert!(summary.top_mood.is_none());
    }

    #[test]
    fn top_mood_is_most_frequent() {
        let mut snapshot = Snapshot::empty();
        record_moods(&mut snapshot, &[Mood::Calm, Mood::Sad, Mood::Calm]);
        let summary = insights(&snapshot);
        assert_eq!(summary.total_check_ins, 3);
        assert_eq!(summary.mood_counts[&Mood::Calm], 2);
        assert_eq!(summary.top_mood, Some((Mood::Calm, 2)));
    }

    #[test]
    fn tie_goes_to_most_recent_mood() {
        let mut snapshot = Snapshot::empty();
        record_moods(&mut snapshot, &[Mood::Calm, Mood::Sad]);
        assert_eq!(insights(&snapshot).top_mood, Some((Mood::Sad, 1)));
    }

    #[test]
    fn recent_gratitudes_are_capped_at_three() {
        let mut snapshot = Snapshot::empty();
        for index in 0..5 {
            let entry = GratitudeEntry::new(Utc::now(), vec![format!("win {index}")]).expect("non-empty items");
            snapshot.gratitudes.record(entry);
        }
        let summary = insights(&snapshot);
        assert_eq!(summary.recent_gratitudes.len(), 3);
        assert_eq!(summary.recent_gratitudes[0].items, vec!["win 4"]);
    }

    #[test]
    fn garden_grows_with_streak() {
        assert!(garden_plants(0).is_empty());
        assert_eq!(garden_plants(1), vec![GardenPlant::Sprout]);
        assert_eq!(garden_plants(6).len(), 2);
        assert_eq!(garden_plants(14).last(), Some(&GardenPlant::Hibiscus));
    }
}
