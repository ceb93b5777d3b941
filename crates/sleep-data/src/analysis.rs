//! Analysis pipeline and the report projection handed to renderers.
//!
//! Runs ingestion, bucketing and statistics over a complete set of batches
//! and returns a [`SleepReport`]. Renderers only format what is in it.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sleep_core::error::Result;
use sleep_core::models::{IngestCounts, Observation};
use sleep_core::statistics::DayStatistics;
use sleep_core::weekday::{day_labels, DayOfWeek};
use tracing::info;

use crate::aggregator::WeekdayBuckets;
use crate::ingest::ingest;
use crate::reader::BatchSource;

// ── Public types ──────────────────────────────────────────────────────────────

/// Statistics for one weekday, tagged with its display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayReport {
    pub day: DayOfWeek,
    pub label: String,
    pub statistics: DayStatistics,
}

/// Provenance of a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    /// RFC 3339 timestamp when the report was computed.
    pub generated_at: String,
    /// Batch names in the order they were ingested.
    pub sources: Vec<String>,
    /// Record counts from ingestion.
    pub counts: IngestCounts,
    /// Earliest night in the report, `None` when there are no observations.
    pub first_night: Option<NaiveDate>,
    /// Latest night in the report.
    pub last_night: Option<NaiveDate>,
}

/// Everything a renderer needs; nothing in it has to be recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepReport {
    /// Weekday labels, Sunday first.
    pub labels: Vec<String>,
    /// Per-day statistics in label order.
    pub days: Vec<DayReport>,
    /// Statistics over every observation.
    pub overall: DayStatistics,
    /// Per-day averages in label order, for the chart.
    pub chart_averages: Vec<f64>,
    /// Per-day population std-devs in label order, for the error bars.
    pub chart_std_devs: Vec<f64>,
    pub metadata: ReportMetadata,
}

impl SleepReport {
    /// Project bucketed observations into a report.
    pub fn from_buckets(buckets: &WeekdayBuckets, metadata: ReportMetadata) -> Self {
        let days: Vec<DayReport> = DayOfWeek::ALL
            .into_iter()
            .zip(buckets.day_statistics())
            .map(|(day, statistics)| DayReport {
                day,
                label: day.label().to_string(),
                statistics,
            })
            .collect();

        Self {
            labels: day_labels(),
            chart_averages: days.iter().map(|d| d.statistics.average).collect(),
            chart_std_devs: days.iter().map(|d| d.statistics.std_dev).collect(),
            overall: buckets.overall_statistics(),
            days,
            metadata,
        }
    }

    /// Statistics for the day with display label `label`.
    pub fn day(&self, label: &str) -> Option<&DayStatistics> {
        self.days
            .iter()
            .find(|d| d.label == label)
            .map(|d| &d.statistics)
    }

    /// Number of retained nights.
    pub fn total_nights(&self) -> usize {
        self.overall.count
    }
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full analysis over a complete set of batches.
///
/// 1. Extract and normalise records from every batch (fails on a
///    malformed batch).
/// 2. Bucket retained observations by weekday.
/// 3. Compute per-day and overall statistics.
/// 4. Return the [`SleepReport`] projection.
pub fn analyze_batches(batches: &[BatchSource]) -> Result<SleepReport> {
    let ingested = ingest(batches)?;
    let buckets = WeekdayBuckets::from_observations(&ingested.observations);

    let (first_night, last_night) = night_range(&ingested.observations);
    let metadata = ReportMetadata {
        generated_at: Utc::now().to_rfc3339(),
        sources: batches.iter().map(|b| b.name.clone()).collect(),
        counts: ingested.counts,
        first_night,
        last_night,
    };

    let report = SleepReport::from_buckets(&buckets, metadata);
    info!(
        "Analysed {} batches: {} nights retained of {} records",
        report.metadata.counts.batches,
        report.total_nights(),
        report.metadata.counts.records_read,
    );
    Ok(report)
}

// ── Private helpers ───────────────────────────────────────────────────────────

fn night_range(observations: &[Observation]) -> (Option<NaiveDate>, Option<NaiveDate>) {
    let first = observations.iter().map(|o| o.date).min();
    let last = observations.iter().map(|o| o.date).max();
    (first, last)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
