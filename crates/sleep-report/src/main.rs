mod bootstrap;
mod loader;

use anyhow::Result;
use sleep_core::settings::Settings;
use sleep_data::analysis::{analyze_batches, SleepReport};
use sleep_data::reader::resolve_sources;
use sleep_render::{write_artifacts, HtmlReport, JsonReport, ReportRenderer, TextSummary};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Sleep Report v{} starting", env!("CARGO_PKG_VERSION"));

    let report = run(&settings).await?;

    if !settings.quiet {
        print!("{}", TextSummary.render(&report)?);
    }

    Ok(())
}

/// Load every batch, analyse, and write the artifacts.
///
/// Nothing is written unless every batch loaded and ingested cleanly.
async fn run(settings: &Settings) -> Result<SleepReport> {
    settings.validate()?;

    let pattern = settings.file_regex()?;
    let sources = resolve_sources(&settings.inputs, settings.data_dir.as_deref(), &pattern)?;
    tracing::info!("Reading {} batch files", sources.len());

    // Aggregation needs the complete observation set; wait for all reads.
    let batches = loader::load_all(&sources).await?;
    let report = analyze_batches(&batches)?;

    // Render everything before touching the filesystem.
    let mut artifacts = vec![(
        settings.output.clone(),
        HtmlReport::new(settings.title.as_str()).render(&report)?,
    )];
    if let Some(path) = &settings.json {
        artifacts.push((path.clone(), JsonReport.render(&report)?));
    }

    write_artifacts(&artifacts)?;
    for (path, _) in &artifacts {
        tracing::info!("Report generated: {}", path.display());
    }

    Ok(report)
}
