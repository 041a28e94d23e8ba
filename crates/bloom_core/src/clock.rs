//! Time source for commands.
//!
//! # Responsibility
//! - Provide the instant stamped on new entries.
//! - Provide the calendar date a check-in counts for.
//!
//! # Invariants
//! - Check-in dates use the device's local timezone at the moment of the
//!   command (`SystemClock`), or the configured offset (`FixedClock`).

use chrono::{DateTime, FixedOffset, Local, NaiveDate, Offset, Utc};
use std::cell::Cell;

pub trait Clock {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Calendar date of `instant` under this clock's timezone policy.
    fn calendar_date(&self, instant: DateTime<Utc>) -> NaiveDate;

    fn today(&self) -> NaiveDate {
        self.calendar_date(self.now())
    }
}

/// Wall clock in the device's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn calendar_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&Local).date_naive()
    }
}

/// Manually driven clock with a fixed UTC offset.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<DateTime<Utc>>,
    offset: FixedOffset,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self {
            now: Cell::new(now),
            offset,
        }
    }

    /// Clock at `now` in UTC.
    pub fn utc(now: DateTime<Utc>) -> Self {
        Self::new(now, Utc.fix())
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    pub fn advance(&self, by: chrono::Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }

    fn calendar_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn calendar_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        (**self).calendar_date(instant)
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, FixedClock};
    use chrono::{Duration, FixedOffset, NaiveDate, TimeZone, Utc};

    #[test]
    fn calendar_date_follows_offset_not_utc() {
        let instant = Utc.with_ymd_and_hms(2026, 5, 1, 23, 30, 0).unwrap();
        let east = FixedClock::new(instant, FixedOffset::east_opt(2 * 3600).unwrap());
        assert_eq!(east.today(), NaiveDate::from_ymd_opt(2026, 5, 2).unwrap());

        let utc = FixedClock::utc(instant);
        assert_eq!(utc.today(), NaiveDate::from_ymd_opt(2026, 5, 1).unwrap());
    }

    #[test]
    fn advance_moves_across_midnight() {
        let clock = FixedClock::utc(Utc.with_ymd_and_hms(2026, 5, 1, 23, 59, 0).unwrap());
        clock.advance(Duration::minutes(2));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 5, 2).unwrap());
    }
}
