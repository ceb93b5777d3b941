use serde::{Deserialize, Serialize};

// ── DayStatistics ─────────────────────────────────────────────────────────────

/// Descriptive statistics over a multiset of sleep durations (hours).
///
/// Used both per weekday bucket and over all observations; the engine has no
/// bucket-specific behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayStatistics {
    /// Number of values.
    pub count: usize,
    /// Arithmetic mean.
    pub average: f64,
    /// Population standard deviation (divisor = `count`).
    pub std_dev: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
}

impl DayStatistics {
    /// Compute statistics over `values`. Order is irrelevant.
    ///
    /// An empty slice yields all-zero statistics without dividing by zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use sleep_core::statistics::DayStatistics;
    ///
    /// let stats = DayStatistics::from_values(&[6.0, 8.0]);
    /// assert_eq!(stats.count, 2);
    /// assert_eq!(stats.average, 7.0);
    /// assert_eq!(stats.std_dev, 1.0);
    ///
    /// assert_eq!(DayStatistics::from_values(&[]), DayStatistics::default());
    /// ```
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len() as f64;
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });

        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        Self {
            count: values.len(),
            // Rounding in the sum can push the mean one ulp past an extreme.
            average: mean.clamp(min, max),
            std_dev: variance.sqrt(),
            min,
            max,
        }
    }

}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "expected {b}, got {a}");
    }

    #[test]
    fn test_empty_is_all_zero() {
        let stats = DayStatistics::from_values(&[]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.average, 0.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 0.0);
        assert!(!stats.average.is_nan());
    }

    #[test]
    fn test_single_value() {
        let stats = DayStatistics::from_values(&[8.0]);
        assert_eq!(stats.count, 1);
        assert_eq!(stats.average, 8.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.min, 8.0);
        assert_eq!(stats.max, 8.0);
    }

    #[test]
    fn test_population_std_dev() {
        // Classic example: population sd = 2.0, sample sd would be ~2.138.
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = DayStatistics::from_values(&values);
        assert_eq!(stats.count, 8);
        assert_close(stats.average, 5.0);
        assert_close(stats.std_dev, 2.0);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
    }

    #[test]
    fn test_order_invariant() {
        let a = DayStatistics::from_values(&[7.5, 3.25, 9.0, 6.0]);
        let b = DayStatistics::from_values(&[9.0, 6.0, 3.25, 7.5]);
        assert_eq!(a.count, b.count);
        assert_close(a.average, b.average);
        assert_close(a.std_dev, b.std_dev);
        assert_eq!(a.min, b.min);
        assert_eq!(a.max, b.max);
    }

    #[test]
    fn test_bounds_hold_for_assorted_inputs() {
        let inputs: [&[f64]; 5] = [
            &[2.1],
            &[0.1, 0.1, 0.1],
            &[5.5, 6.25, 7.75, 8.0, 10.5],
            &[3.3333333333, 3.3333333334],
            &[12.0, 2.01, 7.0, 7.0, 7.0, 7.0],
        ];
        for values in inputs {
            let stats = DayStatistics::from_values(values);
            assert!(stats.std_dev >= 0.0);
            assert!(stats.min <= stats.average, "{values:?}");
            assert!(stats.average <= stats.max, "{values:?}");
        }
    }

    #[test]
    fn test_serializes_camel_case() {
        let stats = DayStatistics::from_values(&[8.0]);
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["count"], 1);
        assert_eq!(json["stdDev"], 0.0);
        assert!(json.get("std_dev").is_none());
    }
}
