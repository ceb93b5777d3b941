use std::path::{Path, PathBuf};

use sleep_core::error::{Result, SleepError};
use tracing::{debug, warn};

/// Write a set of report artifacts, creating parent directories if needed.
///
/// Every artifact is first written to a sibling `<name>.tmp` file. Only
/// when all of them are on disk are they renamed into place, so a failed
/// write leaves neither a truncated report nor a fresh report next to a
/// stale one. Temp files from a failed attempt are removed.
pub fn write_artifacts(artifacts: &[(PathBuf, String)]) -> Result<()> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(artifacts.len());

    for (path, contents) in artifacts {
        match stage(path, contents) {
            Ok(tmp) => staged.push((tmp, path.as_path())),
            Err(err) => {
                discard(&staged);
                return Err(err);
            }
        }
    }

    for (index, (tmp, path)) in staged.iter().enumerate() {
        if let Err(source) = std::fs::rename(tmp, path) {
            discard(&staged[index..]);
            return Err(SleepError::FileWrite {
                path: path.to_path_buf(),
                source,
            });
        }
        debug!("Wrote {}", path.display());
    }

    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    path.with_file_name(tmp_name)
}

fn stage(path: &Path, contents: &str) -> Result<PathBuf> {
    let to_write_error = |source: std::io::Error| SleepError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(to_write_error)?;
    }

    let tmp = temp_path(path);
    std::fs::write(&tmp, contents).map_err(to_write_error)?;
    debug!("Staged {} bytes for {}", contents.len(), path.display());
    Ok(tmp)
}

fn discard(staged: &[(PathBuf, &Path)]) {
    for (tmp, _) in staged {
        if let Err(e) = std::fs::remove_file(tmp) {
            warn!("Could not remove temp file {}: {}", tmp.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_write_artifacts_creates_parents() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("reports").join("2025").join("sleep-report.html");

        write_artifacts(&[(path.clone(), "<html></html>".to_string())]).expect("write");

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn test_write_artifacts_replaces_and_leaves_no_temp_file() {
        let tmp = TempDir::new().expect("tempdir");
        let html = tmp.path().join("report.html");
        let json = tmp.path().join("report.json");

        write_artifacts(&[(json.clone(), "first".to_string())]).expect("write");
        write_artifacts(&[
            (html.clone(), "<html></html>".to_string()),
            (json.clone(), "second".to_string()),
        ])
        .expect("overwrite");

        assert_eq!(std::fs::read_to_string(&json).unwrap(), "second");
        assert_eq!(file_names(tmp.path()), vec!["report.html", "report.json"]);
    }

    #[test]
    fn test_write_artifacts_reports_path_on_failure() {
        let tmp = TempDir::new().expect("tempdir");
        // A regular file cannot act as a parent directory.
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let target = blocker.join("report.html");

        let err = write_artifacts(&[(target.clone(), "x".to_string())]).unwrap_err();
        match err {
            SleepError::FileWrite { path, .. } => assert_eq!(path, target),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_write_artifacts_all_or_nothing() {
        let tmp = TempDir::new().expect("tempdir");
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let html = tmp.path().join("sleep-report.html");

        let result = write_artifacts(&[
            (html.clone(), "<html></html>".to_string()),
            (blocker.join("report.json"), "{}".to_string()),
        ]);

        assert!(result.is_err());
        assert!(!html.exists());
        assert_eq!(file_names(tmp.path()), vec!["blocker"]);
    }
}
