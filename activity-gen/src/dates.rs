use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

/// First day of the generated history
pub const DEFAULT_START: (i32, u32, u32) = (2019, 1, 1);

#[must_use]
pub fn default_start() -> NaiveDate {
    let (year, month, day) = DEFAULT_START;
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// Converts a wall-clock instant into the exclusive end of the date range.
/// Every day whose midnight lies strictly before `now` is part of the history, so the current
/// day is included unless `now` is exactly midnight.
#[must_use]
pub fn exclusive_end(now: NaiveDateTime) -> NaiveDate {
    let today = now.date();
    let time = now.time();
    if time.num_seconds_from_midnight() == 0 && time.nanosecond() == 0 {
        today
    } else {
        today.succ_opt().unwrap_or(today)
    }
}

/// Half-open range of calendar days `[start, end)`. An inverted range is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct Days {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl DateRange {
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the range, `(end - start).days` clamped at zero
    #[must_use]
    pub fn len(&self) -> usize {
        let days = self.end.signed_duration_since(self.start).num_days();
        usize::try_from(days).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    #[must_use]
    pub fn days(&self) -> Days {
        Days {
            next: Some(self.start),
            end: self.end,
        }
    }
}

impl IntoIterator for DateRange {
    type Item = NaiveDate;
    type IntoIter = Days;

    fn into_iter(self) -> Self::IntoIter {
        self.days()
    }
}

impl Iterator for Days {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.filter(|d| *d < self.end)?;
        self.next = current.checked_add_signed(Duration::days(1));
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .next
            .map_or(0, |next| DateRange::new(next, self.end).len());
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Days {}
