//! Init command implementation.
//!
//! Generates a `palettea.yaml` config from the directories holding paint
//! scripts, and a starter script when there are none.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::CONFIG_FILENAME;
use crate::discovery::discover;
use crate::error::{PaletteaError, Result};
use crate::output::{display_path, plural, Printer};

const STARTER_NAME: &str = "sketch.paint.yaml";

const STARTER_SCRIPT: &str = r##"canvas: { width: 256, height: 256, background: "#ffffff" }
brushes:
  pencil: { size: 6, tip: round, colour: "#303030", pressure_size: true }
  mirror: { size: 12, tip: soft, colour: "hsv(210, 0.6, 0.9)", opacity: 0.6,
            symmetry: { horizontal: true } }
layers: [Sketch, Colour]
actions:
  - stroke: { brush: pencil, layer: Sketch, points: [[40, 200, 0.3], [128, 60], [216, 200, 0.3]] }
  - stroke: { brush: mirror, layer: Colour, points: [[60, 140], [110, 150, 0.5]] }
"##;

/// Initialize a palettea project by generating palettea.yaml
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to scan (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing palettea.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let config_path = args.path.join(CONFIG_FILENAME);

    if config_path.exists() && !args.force {
        return Err(PaletteaError::Build {
            message: format!("{} already exists", CONFIG_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    printer.status("Scanning", &display_path(&args.path));
    let discovery = discover(&args.path)?;
    let scripts = &discovery.scan.scripts;

    let source_dirs = source_dirs(scripts, &discovery.root);

    let mut yaml = String::new();
    if !(source_dirs.is_empty() || (source_dirs.len() == 1 && source_dirs.contains("."))) {
        yaml.push_str("sources:\n");
        for dir in &source_dirs {
            yaml.push_str(&format!("  - \"{}\"\n", dir));
        }
    }
    yaml.push_str("output: dist\n");
    yaml.push_str("scale: 1\n");

    write(&config_path, &yaml)?;

    if scripts.is_empty() {
        let starter = args.path.join(STARTER_NAME);
        write(&starter, STARTER_SCRIPT)?;
        printer.success("Created", &display_path(&starter));
    } else {
        let dirs: Vec<&str> = source_dirs.iter().map(|s| s.as_str()).collect();
        printer.info("Discovered", &dirs.join(", "));
    }

    printer.success(
        "Created",
        &format!(
            "{} ({} found)",
            CONFIG_FILENAME,
            plural(scripts.len(), "script", "scripts")
        ),
    );

    Ok(())
}

/// Parent directories of `scripts`, relative to `root`, as `dir/` or `.`.
fn source_dirs(scripts: &[PathBuf], root: &Path) -> BTreeSet<String> {
    scripts
        .iter()
        .filter_map(|file| file.parent())
        .map(|parent| {
            let relative = parent.strip_prefix(root).unwrap_or(parent);
            if relative == Path::new("") {
                ".".to_string()
            } else {
                format!("{}/", relative.display())
            }
        })
        .collect()
}

fn write(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| PaletteaError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write file: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::parser::load_script;
    use crate::validation::validate_script;
    use tempfile::tempdir;

    fn init(path: &Path, force: bool) -> Result<()> {
        let args = InitArgs {
            path: path.to_path_buf(),
            force,
        };
        run(args, &Printer::new())
    }

    #[test]
    fn test_init_creates_config_and_starter() {
        let dir = tempdir().unwrap();
        init(dir.path(), false).unwrap();

        let config = Config::load(&dir.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(config.output, PathBuf::from("dist"));
        assert!(config.sources.is_empty());

        let script = load_script(&dir.path().join(STARTER_NAME), 16).unwrap();
        assert_eq!(script.name, "sketch");
        assert!(validate_script(&script).is_ok());
    }

    #[test]
    fn test_init_errors_if_config_exists() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "output: build").unwrap();
        assert!(init(dir.path(), false).is_err());
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "output: build").unwrap();
        init(dir.path(), true).unwrap();

        let content = fs::read_to_string(dir.path().join(CONFIG_FILENAME)).unwrap();
        assert!(content.contains("output: dist"));
    }

    #[test]
    fn test_init_discovers_source_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("portraits")).unwrap();
        fs::create_dir_all(dir.path().join("studies")).unwrap();
        fs::write(dir.path().join("portraits/a.paint.yaml"), "").unwrap();
        fs::write(dir.path().join("studies/b.paint.yaml"), "").unwrap();

        init(dir.path(), false).unwrap();

        let config = Config::load(&dir.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(config.sources, vec!["portraits/", "studies/"]);
        assert!(!dir.path().join(STARTER_NAME).exists());
    }
}
