//! Paint script discovery.
//!
//! Finds `*.paint.yaml` files either from explicit paths given on the
//! command line or by scanning a project root, honouring `palettea.yaml`.
//!
//! # Example
//!
//! ```ignore
//! use palettea::discovery::discover;
//!
//! let result = discover("./sketches")?;
//! println!("Found {} scripts", result.scan.total());
//! ```

mod scanner;

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Result;

pub use scanner::{is_script, scan_directory, scan_sources, ScanResult};

/// Result of discovering scripts in a project.
#[derive(Debug)]
pub struct DiscoveryResult {
    /// The project root directory.
    pub root: PathBuf,

    /// The loaded config (default if no palettea.yaml was found).
    pub config: Config,

    /// Whether a palettea.yaml was found.
    pub has_config: bool,

    /// Discovered script files.
    pub scan: ScanResult,
}

/// Discover scripts in a project directory.
///
/// Uses the `sources` of `palettea.yaml` in `root` when present, otherwise
/// scans all of `root`.
pub fn discover(root: impl AsRef<Path>) -> Result<DiscoveryResult> {
    let root = root.as_ref().to_path_buf();
    let (config, has_config) = Config::find(&root)?;

    let scan = scan_sources(&config.effective_sources(), &root, &config);
    log::debug!("discovered {} script(s) under {}", scan.total(), root.display());

    Ok(DiscoveryResult {
        root,
        config,
        has_config,
        scan,
    })
}

/// Discover scripts from explicit paths.
///
/// Directories are scanned; files are taken as given, whatever their name.
/// The config is looked up in the current directory.
pub fn discover_paths(paths: &[PathBuf]) -> Result<DiscoveryResult> {
    let root = PathBuf::from(".");
    let (config, has_config) = Config::find(&root)?;
    let mut scan = ScanResult::new();

    for path in paths {
        if path.is_dir() {
            scan.merge(scan_directory(path, &config));
        } else {
            scan.merge(ScanResult {
                scripts: vec![path.clone()],
            });
        }
    }

    Ok(DiscoveryResult {
        root,
        config,
        has_config,
        scan,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_discover_without_config() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.paint.yaml"), "canvas: { width: 1, height: 1 }").unwrap();

        let result = discover(dir.path()).unwrap();
        assert!(!result.has_config);
        assert_eq!(result.scan.total(), 1);
    }

    #[test]
    fn test_discover_with_config_sources() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(crate::config::CONFIG_FILENAME), "sources: [art/]\nscale: 2").unwrap();
        fs::create_dir_all(dir.path().join("art")).unwrap();
        fs::write(dir.path().join("art/in.paint.yaml"), "").unwrap();
        fs::write(dir.path().join("out.paint.yaml"), "").unwrap();

        let result = discover(dir.path()).unwrap();
        assert!(result.has_config);
        assert_eq!(result.config.effective_scale(), 2);
        assert_eq!(result.scan.total(), 1);
        assert!(result.scan.scripts[0].ends_with("art/in.paint.yaml"));
    }

    #[test]
    fn test_discover_paths_mixed() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("more")).unwrap();
        let file = dir.path().join("single.yaml");
        fs::write(&file, "").unwrap();
        fs::write(dir.path().join("more/x.paint.yaml"), "").unwrap();

        let result = discover_paths(&[file.clone(), dir.path().join("more")]).unwrap();
        assert_eq!(result.scan.total(), 2);
        assert_eq!(result.scan.scripts[0], file);
    }
}
