//! Result file discovery
//!
//! Every pattern is expanded relative to a root directory and the newest
//! match across all of them wins.

use crate::error::{ReportError, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// Find the most recently modified file matching any of `patterns`.
///
/// Ties on modification time go to the lexicographically greatest path.
/// When nothing matches, the `.csv` files under `root` are logged to help
/// spot a misplaced results directory.
pub fn find_latest(root: &Path, patterns: &[String]) -> Result<PathBuf> {
    let candidates = collect_matches(root, patterns)?;

    let mut latest: Option<(SystemTime, PathBuf)> = None;
    for path in candidates {
        let modified = fs::metadata(&path)?.modified()?;
        let newer = match &latest {
            Some((best, best_path)) => (modified, &path) > (*best, best_path),
            None => true,
        };
        if newer {
            latest = Some((modified, path));
        }
    }

    match latest {
        Some((_, path)) => Ok(path),
        None => {
            let csvs = list_csv_files(root);
            tracing::warn!(
                "No benchmark results found in {:?}; {} CSV file(s) under {}: {:?}",
                patterns,
                csvs.len(),
                root.display(),
                csvs
            );
            Err(ReportError::NoResultsFound {
                patterns: patterns.to_vec(),
            })
        }
    }
}

/// Expand every pattern under `root`, keeping regular files only.
fn collect_matches(root: &Path, patterns: &[String]) -> Result<BTreeSet<PathBuf>> {
    let escaped_root = glob::Pattern::escape(&root.to_string_lossy());
    let mut files = BTreeSet::new();

    for pattern in patterns.iter().filter(|p| !p.trim().is_empty()) {
        let full = Path::new(&escaped_root).join(pattern);
        let matches = glob::glob(&full.to_string_lossy())?;
        for entry in matches {
            match entry {
                Ok(path) if path.is_file() => {
                    files.insert(path);
                }
                Ok(_) => {}
                Err(e) => tracing::debug!("Skipping unreadable match: {}", e),
            }
        }
        tracing::debug!("Pattern {} -> {} file(s) so far", pattern, files.len());
    }

    Ok(files)
}

/// Recursively list every `.csv` file under `root`.
pub fn list_csv_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| {
            let path = entry.path();
            path.is_file() && path.extension().is_some_and(|ext| ext == "csv")
        })
        .map(|entry| entry.path().to_path_buf())
        .collect();
    files.sort();
    files
}
