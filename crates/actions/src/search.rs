//! Recursive glob search over well-known user directories, bounded so a
//! broad pattern cannot scan forever.

use crate::error::ActionError;
use std::path::PathBuf;
use tokio::task;

/// Stop collecting once this many matches are found overall.
pub const MAX_RESULTS: usize = 30;
/// Per-directory cap keeps one huge folder from crowding out the others.
pub const MAX_PER_DIR: usize = 20;
/// Matches shown before the truncation notice.
pub const MAX_SHOWN: usize = 10;

pub async fn find_files(pattern: &str, search_dirs: Vec<PathBuf>) -> Result<String, ActionError> {
    let pattern = pattern.trim().to_string();
    if pattern.is_empty() {
        return Err(ActionError::OperationFailed("empty pattern".to_string()));
    }

    let results = task::spawn_blocking(move || collect_matches(&pattern, &search_dirs))
        .await
        .map_err(|e| ActionError::OperationFailed(e.to_string()))??;

    Ok(format_results(&results.0, &results.1))
}

fn collect_matches(
    pattern: &str,
    search_dirs: &[PathBuf],
) -> Result<(String, Vec<PathBuf>), ActionError> {
    let mut results = Vec::new();
    for dir in search_dirs {
        if !dir.is_dir() {
            continue;
        }
        let glob_pattern = format!("{}/**/{}", dir.display(), pattern);
        let paths = glob::glob(&glob_pattern)
            .map_err(|e| ActionError::OperationFailed(format!("bad pattern: {e}")))?;
        results.extend(paths.filter_map(|p| p.ok()).take(MAX_PER_DIR));
        if results.len() >= MAX_RESULTS {
            results.truncate(MAX_RESULTS);
            break;
        }
    }
    Ok((pattern.to_string(), results))
}

fn format_results(pattern: &str, results: &[PathBuf]) -> String {
    if results.is_empty() {
        return format!(
            "No files matching '{pattern}' found in Desktop, Documents, or Downloads."
        );
    }

    let mut text = format!("Found {} file(s):\n", results.len());
    for path in results.iter().take(MAX_SHOWN) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let folder = path
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        text.push_str(&format!("  {name}\n    {folder}\n"));
    }
    if results.len() > MAX_SHOWN {
        text.push_str(&format!("  ... and {} more.", results.len() - MAX_SHOWN));
    }
    text
}
