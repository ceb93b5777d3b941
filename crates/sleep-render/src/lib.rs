//! Report renderers for Sleep Report.
//!
//! Each renderer turns a finished [`SleepReport`] into text. Renderers only
//! format; every number they print is already in the report.

pub mod html;
pub mod json;
pub mod output;
pub mod summary;

use sleep_core::error::Result;
use sleep_data::analysis::SleepReport;

pub use html::HtmlReport;
pub use json::JsonReport;
pub use output::write_artifacts;
pub use summary::TextSummary;

/// A display format for a [`SleepReport`].
pub trait ReportRenderer {
    /// Short name used in log messages.
    fn name(&self) -> &'static str;
    /// Produce the artifact's full contents.
    fn render(&self, report: &SleepReport) -> Result<String>;
}
