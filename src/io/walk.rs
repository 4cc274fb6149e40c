use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Recursively collect every regular file under `root`.
///
/// No extension filter is applied: bundles are deployed under arbitrary names
/// (`bundleFile`, `*.jar`, ...), so every file is a candidate archive. Paths are
/// absolute and sorted so repeated runs over the same tree print the same report.
pub fn walk_bundles(root: &Path) -> Result<Vec<PathBuf>> {
    let root = std::path::absolute(root)?;
    let mut files = Vec::new();

    for entry in WalkDir::new(&root).follow_links(true).sort_by_file_name() {
        match entry {
            Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
            Ok(_) => {}
            Err(e) => warn!("Skipping unreadable path: {e}"),
        }
    }

    files.sort();
    Ok(files)
}
