//! Daily streak arithmetic.
//!
//! # Invariants
//! - Only calendar dates are compared; the time of day never matters.
//! - A second check-in on the same date is a no-op.

use crate::model::profile::Profile;
use chrono::NaiveDate;

/// Applies one check-in on `today` to `profile`.
///
/// - Same date as the last check-in: profile returned unchanged.
/// - First check-in ever, or the day right after the last one: streak + 1.
/// - Any other date, earlier ones included: streak restarts at 1.
pub fn apply_check_in(profile: &Profile, today: NaiveDate) -> Profile {
    let mut next = profile.clone();

    match profile.last_check_in_date {
        Some(last) if last == today => return next,
        Some(last) if last.succ_opt() == Some(today) => {
            next.streak_count = profile.streak_count.saturating_add(1);
        }
        Some(_) => next.streak_count = 1,
        None => next.streak_count = profile.streak_count.saturating_add(1),
    }

    next.last_check_in_date = Some(today);
    next
}

#[cfg(test)]
mod tests {
    use super::apply_check_in;
    use crate::model::profile::Profile;
    use chrono::{Days, NaiveDate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn first_check_in_starts_streak_at_one() {
        let next = apply_check_in(&Profile::default(), date(2026, 3, 1));
        assert_eq!(next.streak_count, 1);
        assert_eq!(next.last_check_in_date, Some(date(2026, 3, 1)));
    }

    #[test]
    fn consecutive_days_count_up() {
        let start = date(2026, 2, 25);
        let mut profile = Profile::default();
        for offset in 0..10u64 {
            profile = apply_check_in(&profile, start + Days::new(offset));
            assert_eq!(u64::from(profile.streak_count), offset + 1);
        }
    }

    #[test]
    fn consecutive_days_cross_month_and_year_boundaries() {
        let mut profile = apply_check_in(&Profile::default(), date(2025, 12, 31));
        profile = apply_check_in(&profile, date(2026, 1, 1));
        assert_eq!(profile.streak_count, 2);

        let mut profile = apply_check_in(&Profile::default(), date(2028, 2, 28));
        profile = apply_check_in(&profile, date(2028, 2, 29));
        profile = apply_check_in(&profile, date(2028, 3, 1));
        assert_eq!(profile.streak_count, 3);
    }

    #[test]
    fn same_day_check_in_is_idempotent() {
        let first = apply_check_in(&Profile::default(), date(2026, 3, 1));
        let second = apply_check_in(&first, date(2026, 3, 1));
        assert_eq!(first, second);
    }

    #[test]
    fn gap_of_two_days_resets_to_one() {
        let mut profile = apply_check_in(&Profile::default(), date(2026, 3, 1));
        profile = apply_check_in(&profile, date(2026, 3, 2));
        assert_eq!(profile.streak_count, 2);

        profile = apply_check_in(&profile, date(2026, 3, 4));
        assert_eq!(profile.streak_count, 1);
        assert_eq!(profile.last_check_in_date, Some(date(2026, 3, 4)));
    }

    #[test]
    fn earlier_date_resets_to_one() {
        let mut profile = Profile::default();
        for day in 3..=5 {
            profile = apply_check_in(&profile, date(2026, 3, day));
        }
        assert_eq!(profile.streak_count, 3);

        let next = apply_check_in(&profile, date(2026, 3, 2));
        assert_eq!(next.streak_count, 1);
        assert_eq!(next.last_check_in_date, Some(date(2026, 3, 2)));
    }
}
