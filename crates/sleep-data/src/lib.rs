//! Data ingestion layer for the sleep report.
//!
//! Responsible for discovering and reading exported sleep record batches,
//! normalising records into observations, bucketing them by weekday and
//! running the analysis pipeline.

pub mod aggregator;
pub mod analysis;
pub mod ingest;
pub mod reader;

pub use sleep_core as core;
