use sleep_core::error::{Result, SleepError};
use sleep_data::analysis::SleepReport;

use crate::ReportRenderer;

/// Pretty-printed JSON of the whole report, for downstream tooling.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReport;

impl ReportRenderer for JsonReport {
    fn name(&self) -> &'static str {
        "json"
    }

    fn render(&self, report: &SleepReport) -> Result<String> {
        serde_json::to_string_pretty(report).map_err(|source| SleepError::Render {
            renderer: self.name(),
            source,
        })
    }
}
