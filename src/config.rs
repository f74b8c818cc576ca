//! Project configuration (palettea.yaml) parsing.
//!
//! The config file sets where scripts are found, where PNGs go, and the
//! defaults the CLI uses when no flag overrides them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::canvas::{CanvasOptions, DEFAULT_HISTORY_LIMIT};
use crate::engine::tip::DEFAULT_TIP_SIZE;
use crate::error::{PaletteaError, Result};

/// The name of the project config file.
pub const CONFIG_FILENAME: &str = "palettea.yaml";

/// Project configuration loaded from palettea.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directories to scan for paint scripts. Defaults to the project root.
    pub sources: Vec<String>,

    /// Output directory for rendered PNGs.
    pub output: PathBuf,

    /// Integer upscaling applied when writing PNGs.
    pub scale: Option<u32>,

    /// Edge length of procedurally rasterized brush tips.
    pub tip_size: Option<u32>,

    /// Undo steps kept per canvas.
    pub history_limit: Option<usize>,

    /// Densify strokes by brush spacing.
    pub interpolate: Option<bool>,

    /// Patterns to exclude from discovery.
    pub excludes: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: vec![],
            output: PathBuf::from("dist"),
            scale: None,
            tip_size: None,
            history_limit: None,
            interpolate: None,
            excludes: vec![],
        }
    }
}

impl Config {
    /// Load config from a palettea.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PaletteaError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse config from a YAML string. An empty document yields defaults.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| PaletteaError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })
    }

    /// Load `palettea.yaml` from a directory, falling back to defaults.
    ///
    /// Returns the config and whether a file was found.
    pub fn find(dir: &Path) -> Result<(Self, bool)> {
        let path = dir.join(CONFIG_FILENAME);
        if path.is_file() {
            log::debug!("loading config from {}", path.display());
            Ok((Self::load(&path)?, true))
        } else {
            Ok((Self::default(), false))
        }
    }

    /// Check if a path should be excluded based on exclude patterns.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.excludes
            .iter()
            .any(|pattern| matches_pattern(&path_str, pattern))
    }

    /// Source directories, defaulting to the current directory.
    pub fn effective_sources(&self) -> Vec<String> {
        if self.sources.is_empty() {
            vec![".".to_string()]
        } else {
            self.sources.clone()
        }
    }

    pub fn effective_scale(&self) -> u32 {
        self.scale.unwrap_or(1).max(1)
    }

    pub fn effective_tip_size(&self) -> u32 {
        self.tip_size.unwrap_or(DEFAULT_TIP_SIZE).max(1)
    }

    pub fn effective_history_limit(&self) -> usize {
        self.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT)
    }

    pub fn effective_interpolate(&self) -> bool {
        self.interpolate.unwrap_or(true)
    }

    /// Canvas options from this config. The background comes from the script.
    pub fn canvas_options(&self) -> CanvasOptions {
        CanvasOptions {
            history_limit: self.effective_history_limit(),
            interpolate: self.effective_interpolate(),
            ..Default::default()
        }
    }
}

/// Minimal glob matching: `*.ext`, `dir/*`, `**/dir/*`, or a substring.
fn matches_pattern(path: &str, pattern: &str) -> bool {
    if let Some(suffix) = pattern.strip_prefix("**/") {
        if let Some(dir) = suffix.strip_suffix("/*") {
            return path.starts_with(&format!("{}/", dir)) || path.contains(&format!("/{}/", dir));
        }
        return path.contains(suffix);
    }

    if let Some(suffix) = pattern.strip_prefix('*') {
        if !pattern.contains('/') {
            return path.ends_with(suffix);
        }
    }

    if let Some(prefix) = pattern.strip_suffix("/*") {
        return path.starts_with(&format!("{}/", prefix)) || path.contains(&format!("/{}/", prefix));
    }

    path.contains(pattern)
}
