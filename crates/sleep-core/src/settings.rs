use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use regex::Regex;

use crate::error::{Result, SleepError};

/// File names picked up from `--data-dir` unless overridden.
pub const DEFAULT_FILE_PATTERN: &str = r"^sleep-.*\.json$";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Weekday sleep-duration report from exported sleep records
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sleep-report",
    about = "Weekday sleep-duration report from exported sleep records",
    version
)]
pub struct Settings {
    /// Sleep record batch files (JSON exports)
    pub inputs: Vec<PathBuf>,

    /// Directory scanned recursively for batch files
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Regex matched against file names found under --data-dir
    #[arg(long, default_value = DEFAULT_FILE_PATTERN)]
    pub file_pattern: String,

    /// HTML report path
    #[arg(short, long, default_value = "sleep-report.html")]
    pub output: PathBuf,

    /// Also write the computed statistics as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Report title
    #[arg(long, default_value = "Sleep Analysis Report")]
    pub title: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Do not print the console summary
    #[arg(short, long)]
    pub quiet: bool,
}

impl Settings {
    /// Parse the process arguments.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] with an explicit argument list, so tests
    /// can avoid the process environment.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);
        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Compiled `--file-pattern`.
    pub fn file_regex(&self) -> Result<Regex> {
        Regex::new(&self.file_pattern).map_err(|e| {
            SleepError::Config(format!("invalid --file-pattern {:?}: {}", self.file_pattern, e))
        })
    }

    /// Reject settings that cannot produce a report.
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() && self.data_dir.is_none() {
            return Err(SleepError::NoSources);
        }
        self.file_regex()?;
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
