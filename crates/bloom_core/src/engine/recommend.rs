//! Exercise recommendation from the latest mood.

use crate::model::exercise::ExerciseKind;
use crate::model::mood::Mood;

/// Suggests an exercise for the most recent mood.
///
/// Only the single latest check-in is considered; older history is ignored.
pub fn recommend(most_recent: Option<Mood>) -> ExerciseKind {
    match most_recent {
        None | Some(Mood::Anxious) => ExerciseKind::Breathing,
        Some(Mood::Sad) => ExerciseKind::Gratitude,
        Some(Mood::Angry) => ExerciseKind::Grounding,
        Some(_) => ExerciseKind::Reframing,
    }
}

#[cfg(test)]
mod tests {
    use super::recommend;
    use crate::model::exercise::ExerciseKind;
    use crate::model::mood::Mood;

    #[test]
    fn no_mood_defaults_to_breathing() {
        assert_eq!(recommend(None), ExerciseKind::Breathing);
    }

    #[test]
    fn special_moods_have_dedicated_exercises() {
        assert_eq!(recommend(Some(Mood::Anxious)), ExerciseKind::Breathing);
        assert_eq!(recommend(Some(Mood::Sad)), ExerciseKind::Gratitude);
        assert_eq!(recommend(Some(Mood::Angry)), ExerciseKind::Grounding);
    }

    #[test]
    fn remaining_moods_get_reframing() {
        for mood in [
            Mood::Joyful,
            Mood::Calm,
            Mood::Neutral,
            Mood::Tired,
            Mood::Energized,
        ] {
            assert_eq!(recommend(Some(mood)), ExerciseKind::Reframing);
        }
    }
}
