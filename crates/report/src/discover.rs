//! Discover — locate log files under a directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Find log files in a directory: regular files whose names contain
/// `log` or `access` (case-insensitive), sorted by name. A missing
/// directory is simply no files, not an error.
pub fn find_log_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_log_file(&path) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn is_log_file(path: &Path) -> bool {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    ["log", "access"].iter().any(|needle| name.contains(needle))
}
