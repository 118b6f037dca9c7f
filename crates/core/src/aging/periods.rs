//! Aging window boundaries.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::types::AgingBucket;

/// Width of the 121-180 band.
const SIXTY_DAY_BAND: u64 = 60;
/// Width of the 181-365 band.
const STATUTORY_BAND: u64 = 185;
/// Number of windows sized by the period length.
const CUSTOM_WINDOWS: u64 = 4;

/// Inclusive date window; `start` is `None` for the open-ended oldest bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingWindow {
    /// First day (inclusive).
    pub start: Option<NaiveDate>,
    /// Last day (inclusive).
    pub end: NaiveDate,
}

impl AgingWindow {
    /// Returns true if the date falls inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date <= self.end && self.start.is_none_or(|start| date >= start)
    }
}

/// The seven contiguous windows going backward from an as-of date.
///
/// The first four are `period_length_days` wide; the 121-180 and 181-365
/// bands keep their fixed 60 and 185 day widths whatever the period length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingPeriods {
    as_of: NaiveDate,
    period_length_days: u32,
    windows: [AgingWindow; AgingBucket::COUNT],
}

impl AgingPeriods {
    /// Computes the windows. A zero period length is treated as one day.
    #[must_use]
    pub fn new(as_of: NaiveDate, period_length_days: u32) -> Self {
        let length = u64::from(period_length_days.max(1));
        let back = |days: u64| as_of.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN);

        let custom_end = CUSTOM_WINDOWS * length;
        let sixty_end = custom_end + SIXTY_DAY_BAND;
        let statutory_end = sixty_end + STATUTORY_BAND;

        let window = |newest: u64, oldest: u64| AgingWindow {
            start: Some(back(oldest)),
            end: back(newest),
        };

        let windows = [
            // Lines due on the as-of date are not yet overdue.
            window(0, length),
            window(length + 1, 2 * length),
            window(2 * length + 1, 3 * length),
            window(3 * length + 1, custom_end),
            window(custom_end + 1, sixty_end),
            window(sixty_end + 1, statutory_end),
            AgingWindow {
                start: None,
                end: back(statutory_end + 1),
            },
        ];
        Self {
            as_of,
            period_length_days,
            windows,
        }
    }

    /// Report date the windows count back from.
    #[must_use]
    pub const fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// Requested width of the custom windows.
    #[must_use]
    pub const fn period_length_days(&self) -> u32 {
        self.period_length_days
    }

    /// Window of a bucket.
    #[must_use]
    pub const fn window(&self, bucket: AgingBucket) -> AgingWindow {
        self.windows[bucket.index()]
    }

    /// Bucket for a due date.
    ///
    /// Due dates after the as-of date are not overdue and land in the first
    /// bucket; anything older than every bounded window lands in 365+.
    #[must_use]
    pub fn bucket_for(&self, due: NaiveDate) -> AgingBucket {
        if due > self.as_of {
            return AgingBucket::Days0To30;
        }
        AgingBucket::ALL
            .into_iter()
            .find(|bucket| self.window(*bucket).contains(due))
            .unwrap_or(AgingBucket::Over365)
    }
}
