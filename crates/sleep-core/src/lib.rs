//! Domain types and the statistics engine for the sleep report.
//!
//! Holds everything that does not touch the filesystem: the weekday
//! mapping, record normalisation, descriptive statistics, error types,
//! number formatting and command-line settings.

pub mod data_processors;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod statistics;
pub mod weekday;
