use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::weekday::DayOfWeek;

/// Durations at or below this many hours mean the device was not running.
/// They are sentinels, not short nights, and never enter the statistics.
pub const MIN_RETAINED_HOURS: f64 = 2.0;

/// `totalUsage` is recorded in minutes.
pub const MINUTES_PER_HOUR: f64 = 60.0;

/// Convert a recorded usage in minutes to hours.
pub fn minutes_to_hours(minutes: f64) -> f64 {
    minutes / MINUTES_PER_HOUR
}

/// Whether a duration passes the sentinel filter.
pub fn is_retained(hours: f64) -> bool {
    hours > MIN_RETAINED_HOURS
}

/// One retained sleep measurement with its derived weekday.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Calendar date the session started on.
    pub date: NaiveDate,
    /// Bucket key derived from `date`.
    pub weekday: DayOfWeek,
    /// Duration in hours, always greater than [`MIN_RETAINED_HOURS`].
    pub hours: f64,
}

impl Observation {
    /// Build an observation, deriving the weekday from `date`.
    pub fn new(date: NaiveDate, hours: f64) -> Self {
        Self {
            date,
            weekday: DayOfWeek::of_date(date),
            hours,
        }
    }
}

/// Record counts collected while ingesting a set of batches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestCounts {
    /// Batches whose record list was extracted.
    pub batches: usize,
    /// Items seen across all record lists.
    pub records_read: usize,
    /// Records that became observations.
    pub records_retained: usize,
    /// Valid records dropped by the sentinel filter.
    pub records_filtered: usize,
    /// Invalid records skipped with a warning.
    pub records_skipped: usize,
}

impl IngestCounts {
    /// Fold another batch's counts into these totals.
    pub fn merge(&mut self, other: &IngestCounts) {
        self.batches += other.batches;
        self.records_read += other.records_read;
        self.records_retained += other.records_retained;
        self.records_filtered += other.records_filtered;
        self.records_skipped += other.records_skipped;
    }
}
