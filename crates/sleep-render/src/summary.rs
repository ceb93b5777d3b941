use std::fmt::Write as _;

use sleep_core::error::Result;
use sleep_core::formatting::{format_decimal, format_nights, format_range};
use sleep_data::analysis::SleepReport;

use crate::ReportRenderer;

/// Plain-text summary for the console.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextSummary;

impl ReportRenderer for TextSummary {
    fn name(&self) -> &'static str {
        "summary"
    }

    fn render(&self, report: &SleepReport) -> Result<String> {
        let overall = &report.overall;
        let counts = &report.metadata.counts;
        let mut out = String::new();

        let _ = writeln!(out, "Overall Statistics:");
        let _ = writeln!(out, "  Total nights: {}", overall.count);
        let _ = writeln!(
            out,
            "  Average sleep: {} hours",
            format_decimal(overall.average, 2)
        );
        let _ = writeln!(
            out,
            "  Standard deviation: {} hours",
            format_decimal(overall.std_dev, 2)
        );
        let _ = writeln!(
            out,
            "  Range: {} hours",
            format_range(overall.min, overall.max)
        );
        if counts.records_skipped > 0 {
            let _ = writeln!(out, "  Skipped records: {}", counts.records_skipped);
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Average sleep by day of week:");
        for day in &report.days {
            let _ = writeln!(
                out,
                "  {}: {} hours ({})",
                day.label,
                format_decimal(day.statistics.average, 2),
                format_nights(day.statistics.count),
            );
        }

        Ok(out)
    }
}
