//! Batch file discovery and loading.
//!
//! A batch is one exported JSON document holding a list of sleep records.
//! Reading is all-or-nothing: the first unreadable or unparsable batch
//! aborts, since a silently missing batch would skew every statistic.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde_json::Value;
use sleep_core::error::{Result, SleepError};
use tracing::{debug, warn};

// ── BatchSource ───────────────────────────────────────────────────────────────

/// One parsed batch document and the name it is reported under.
#[derive(Debug, Clone)]
pub struct BatchSource {
    /// Usually the file name, e.g. `"sleep-09.json"`.
    pub name: String,
    /// The whole JSON document; the record list is nested inside.
    pub document: Value,
}

impl BatchSource {
    /// Wrap an already-parsed document.
    pub fn new(name: impl Into<String>, document: Value) -> Self {
        Self {
            name: name.into(),
            document,
        }
    }

    /// Parse a batch from its JSON text.
    pub fn from_json_str(name: impl Into<String>, text: &str) -> Result<Self> {
        let name = name.into();
        let document = serde_json::from_str(text).map_err(|source| SleepError::BatchParse {
            source_name: name.clone(),
            source,
        })?;
        Ok(Self { name, document })
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Name a batch is reported under: the file name, or the full path when
/// there is none.
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Find all files under `dir` (recursively) whose file name matches
/// `pattern`, sorted by path.
pub fn find_batch_files(dir: &Path, pattern: &Regex) -> Vec<PathBuf> {
    if !dir.exists() {
        warn!("Data directory does not exist: {}", dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && pattern.is_match(&entry.file_name().to_string_lossy())
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Build the ordered list of batch files for a run.
///
/// Explicit `inputs` come first, in the order given, followed by files
/// discovered under `data_dir`. A file reachable under two spellings
/// (`sleep-09.json` and `./sleep-09.json`) is read once, under the first
/// spelling seen.
pub fn resolve_sources(
    inputs: &[PathBuf],
    data_dir: Option<&Path>,
    pattern: &Regex,
) -> Result<Vec<PathBuf>> {
    let mut sources: Vec<PathBuf> = inputs.to_vec();

    if let Some(dir) = data_dir {
        if !dir.is_dir() {
            return Err(SleepError::Config(format!(
                "data directory {} does not exist",
                dir.display()
            )));
        }
        let found = find_batch_files(dir, pattern);
        debug!("Discovered {} batch files in {}", found.len(), dir.display());
        sources.extend(found);
    }

    let mut seen: HashSet<PathBuf> = HashSet::new();
    sources.retain(|p| {
        let first = seen.insert(identity(p));
        if !first {
            debug!("Skipping duplicate batch path {}", p.display());
        }
        first
    });

    if sources.is_empty() {
        return Err(SleepError::NoSources);
    }
    Ok(sources)
}

/// Key used to recognise the same file under different spellings.
///
/// Paths that cannot be resolved (e.g. missing files) keep their literal
/// form; reading them fails later with a `FileRead` error.
fn identity(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
