//! Turns batch documents into retained [`Observation`]s.
//!
//! A batch without its record list is fatal. A bad record inside a good
//! batch is expected noise: it is skipped with a warning.

use serde_json::Value;
use sleep_core::data_processors::{StartDateProcessor, UsageExtractor};
use sleep_core::error::{InvalidRecord, Result, SleepError};
use sleep_core::models::{is_retained, minutes_to_hours, IngestCounts, Observation};
use tracing::{debug, warn};

use crate::reader::BatchSource;

/// Keys leading from a batch root to its record list. Each step lists
/// accepted spellings, tried in order.
const RECORD_LIST_PATH: [&[&str]; 4] = [
    &["data"],
    &["getPatientWrapper", "patientWrapper"],
    &["sleepRecords"],
    &["items"],
];

/// Observations and counts produced by ingestion.
#[derive(Debug, Clone, Default)]
pub struct Ingested {
    pub observations: Vec<Observation>,
    pub counts: IngestCounts,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Locate the record list of a batch.
///
/// Fails with [`SleepError::MalformedInput`] when a key on the path is
/// missing or the final value is not a list.
pub fn record_list(batch: &BatchSource) -> Result<&[Value]> {
    let mut node = &batch.document;
    for keys in RECORD_LIST_PATH {
        let parent = node;
        node = keys
            .iter()
            .find_map(|key| parent.get(*key))
            .ok_or_else(|| malformed(batch, format!("missing key `{}`", keys[0])))?;
    }
    node.as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| malformed(batch, "`items` is not a list".to_string()))
}

/// Normalise one record.
///
/// Returns `Ok(None)` for a valid record whose duration is a sentinel, and
/// `Err` for a record that cannot be interpreted.
pub fn parse_record(item: &Value) -> std::result::Result<Option<Observation>, InvalidRecord> {
    let record = item.as_object().ok_or(InvalidRecord::NotAnObject)?;

    let hours = minutes_to_hours(UsageExtractor::minutes(record.get("totalUsage"))?);
    if !is_retained(hours) {
        return Ok(None);
    }

    let date = StartDateProcessor::parse(record.get("startDate").unwrap_or(&Value::Null))?;
    Ok(Some(Observation::new(date, hours)))
}

/// Ingest a single batch.
pub fn ingest_batch(batch: &BatchSource) -> Result<Ingested> {
    let records = record_list(batch)?;
    let mut out = Ingested {
        observations: Vec::with_capacity(records.len()),
        counts: IngestCounts {
            batches: 1,
            records_read: records.len(),
            ..Default::default()
        },
    };

    for (index, item) in records.iter().enumerate() {
        match parse_record(item) {
            Ok(Some(obs)) => {
                out.counts.records_retained += 1;
                out.observations.push(obs);
            }
            Ok(None) => out.counts.records_filtered += 1,
            Err(reason) => {
                out.counts.records_skipped += 1;
                warn!("Skipping record {} in {}: {}", index, batch.name, reason);
            }
        }
    }

    debug!(
        "Batch {}: {} read, {} retained, {} filtered, {} skipped",
        batch.name,
        out.counts.records_read,
        out.counts.records_retained,
        out.counts.records_filtered,
        out.counts.records_skipped,
    );

    Ok(out)
}

/// Ingest every batch. Any malformed batch aborts the whole run.
pub fn ingest(batches: &[BatchSource]) -> Result<Ingested> {
    let mut all = Ingested::default();
    for batch in batches {
        let ingested = ingest_batch(batch)?;
        all.observations.extend(ingested.observations);
        all.counts.merge(&ingested.counts);
    }
    Ok(all)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn malformed(batch: &BatchSource, reason: String) -> SleepError {
    SleepError::MalformedInput {
        source_name: batch.name.clone(),
        reason,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
