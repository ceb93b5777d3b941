//! Concurrent batch loading.
//!
//! Every file is read on the tokio runtime at once, but the caller only gets
//! batches back once all of them have loaded. The first failure aborts the
//! rest.

use std::path::{Path, PathBuf};

use sleep_core::error::{Result, SleepError};
use sleep_data::reader::{source_name, BatchSource};
use tokio::task::JoinSet;
use tracing::debug;

/// Read and parse all `paths`, returning batches in input order.
pub async fn load_all(paths: &[PathBuf]) -> Result<Vec<BatchSource>> {
    let mut tasks = JoinSet::new();
    for (index, path) in paths.iter().cloned().enumerate() {
        tasks.spawn(async move { (index, load_one(&path).await) });
    }

    let mut slots: Vec<Option<BatchSource>> = (0..paths.len()).map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        let (index, result) = joined.map_err(|e| SleepError::Other(e.into()))?;
        // Returning drops `tasks`, which aborts any read still in flight.
        slots[index] = Some(result?);
    }

    debug!("Loaded {} batches", slots.len());
    Ok(slots.into_iter().flatten().collect())
}

async fn load_one(path: &Path) -> Result<BatchSource> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SleepError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
    BatchSource::from_json_str(source_name(path), &text)
}
