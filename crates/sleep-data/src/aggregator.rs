//! Weekday bucketing of observations.

use sleep_core::models::Observation;
use sleep_core::statistics::DayStatistics;
use sleep_core::weekday::DayOfWeek;

// ── WeekdayBuckets ────────────────────────────────────────────────────────────

/// Observed hours partitioned by weekday.
///
/// All seven buckets always exist, possibly empty. Within a bucket values
/// keep insertion order, which carries no meaning. The buckets are filled
/// once by [`WeekdayBuckets::from_observations`] and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeekdayBuckets {
    buckets: [Vec<f64>; DayOfWeek::COUNT],
}

impl WeekdayBuckets {
    /// Partition `observations` by their weekday.
    pub fn from_observations(observations: &[Observation]) -> Self {
        let mut out = Self::default();
        for obs in observations {
            out.buckets[obs.weekday.index()].push(obs.hours);
        }
        out
    }

    /// Hours recorded for `day`.
    pub fn hours(&self, day: DayOfWeek) -> &[f64] {
        &self.buckets[day.index()]
    }

    /// The union of all buckets.
    pub fn all_hours(&self) -> Vec<f64> {
        self.buckets.iter().flatten().copied().collect()
    }

    /// Statistics for each weekday, Sunday first.
    pub fn day_statistics(&self) -> [DayStatistics; DayOfWeek::COUNT] {
        DayOfWeek::ALL.map(|day| DayStatistics::from_values(self.hours(day)))
    }

    /// Statistics over every observation, each counted once.
    pub fn overall_statistics(&self) -> DayStatistics {
        DayStatistics::from_values(&self.all_hours())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn obs(y: i32, m: u32, d: u32, hours: f64) -> Observation {
        Observation::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), hours)
    }

    fn sample() -> Vec<Observation> {
        vec![
            obs(2025, 9, 14, 8.0), // Sunday
            obs(2025, 9, 15, 5.0), // Monday
            obs(2025, 9, 21, 6.0), // Sunday
            obs(2025, 9, 19, 9.5), // Friday
            obs(2025, 9, 22, 7.0), // Monday
        ]
    }

    #[test]
    fn test_buckets_group_by_weekday() {
        let buckets = WeekdayBuckets::from_observations(&sample());
        assert_eq!(buckets.hours(DayOfWeek::Sunday), &[8.0, 6.0]);
        assert_eq!(buckets.hours(DayOfWeek::Monday), &[5.0, 7.0]);
        assert_eq!(buckets.hours(DayOfWeek::Friday), &[9.5]);
        assert!(buckets.hours(DayOfWeek::Wednesday).is_empty());
    }

    #[test]
    fn test_all_seven_buckets_exist_when_empty() {
        let buckets = WeekdayBuckets::from_observations(&[]);
        for day in DayOfWeek::ALL {
            assert!(buckets.hours(day).is_empty(), "{day}");
        }
        assert_eq!(buckets.day_statistics().len(), DayOfWeek::COUNT);
        assert!(buckets.all_hours().is_empty());
    }

    #[test]
    fn test_buckets_partition_observations() {
        let observations = sample();
        let buckets = WeekdayBuckets::from_observations(&observations);

        assert_eq!(buckets.all_hours().len(), observations.len());

        let mut union = buckets.all_hours();
        let mut expected: Vec<f64> = observations.iter().map(|o| o.hours).collect();
        union.sort_by(f64::total_cmp);
        expected.sort_by(f64::total_cmp);
        assert_eq!(union, expected);
    }

    #[test]
    fn test_overall_count_is_sum_of_days() {
        let buckets = WeekdayBuckets::from_observations(&sample());
        let per_day: usize = buckets.day_statistics().iter().map(|s| s.count).sum();
        assert_eq!(buckets.overall_statistics().count, per_day);
    }

    #[test]
    fn test_overall_weights_observations_not_days() {
        // Sunday avg 7.0 (two nights), Monday avg 6.0 (two nights),
        // Friday avg 9.5 (one night). Mean of day means would be 7.5.
        let buckets = WeekdayBuckets::from_observations(&sample());
        let overall = buckets.overall_statistics();
        assert!((overall.average - 35.5 / 5.0).abs() < 1e-9);
    }
}
