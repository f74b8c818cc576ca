//! File system scanner for paint scripts.
//!
//! Recursively walks directories collecting `*.paint.yaml` files.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::Config;
use crate::parser::SCRIPT_SUFFIX;

/// Scripts found by a scan, in walk order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScanResult {
    pub scripts: Vec<PathBuf>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    /// Merge another scan result, skipping paths already present.
    pub fn merge(&mut self, other: ScanResult) {
        for path in other.scripts {
            if !self.scripts.contains(&path) {
                self.scripts.push(path);
            }
        }
    }
}

/// Scan a directory for paint scripts.
///
/// Entries are visited in file-name order so output is stable.
pub fn scan_directory(root: &Path, config: &Config) -> ScanResult {
    let mut result = ScanResult::new();

    if !root.exists() {
        return result;
    }

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !entry.file_type().is_file() {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        if config.is_excluded(relative) {
            log::trace!("excluded {}", path.display());
            continue;
        }

        if is_script(path) {
            result.scripts.push(path.to_path_buf());
        }
    }

    result
}

/// Scan multiple source paths relative to `base_path`.
pub fn scan_sources(sources: &[String], base_path: &Path, config: &Config) -> ScanResult {
    let mut result = ScanResult::new();

    for source in sources {
        let source_path = if source == "." {
            base_path.to_path_buf()
        } else if Path::new(source).is_absolute() {
            PathBuf::from(source)
        } else {
            base_path.join(source)
        };

        result.merge(scan_directory(&source_path, config));
    }

    result
}

/// Whether a path names a paint script.
pub fn is_script(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(SCRIPT_SUFFIX))
}
