//! Validate command implementation.
//!
//! Parses and checks paint scripts without rendering them.

use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;

use crate::config::Config;
use crate::discovery::{discover, discover_paths};
use crate::error::{PaletteaError, Result};
use crate::output::{display_path, plural, Printer};
use crate::parser::{load_script, script_stem};
use crate::validation::{
    print_diagnostics, validate_script_with_history, Diagnostic, ValidationResult,
};

/// Validate paint scripts without rendering
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// Scripts or directories (default: discover from the current directory)
    pub paths: Vec<PathBuf>,

    /// Print a JSON report to stdout instead of human-readable diagnostics
    #[arg(long)]
    pub json: bool,
}

/// Validation outcome for one file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub file: String,
    pub name: String,
    pub errors: usize,
    pub warnings: usize,
    #[serde(flatten)]
    pub result: ValidationResult,
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let discovery = if args.paths.is_empty() {
        discover(".")?
    } else {
        discover_paths(&args.paths)?
    };
    let reports: Vec<FileReport> = discovery
        .scan
        .scripts
        .iter()
        .map(|path| check_file(path, &discovery.config))
        .collect();

    if args.json {
        let json = serde_json::to_string_pretty(&reports).map_err(|e| PaletteaError::Build {
            message: format!("Failed to serialize report: {}", e),
            help: None,
        })?;
        println!("{}", json);
    } else {
        for report in &reports {
            print_diagnostics(&report.name, &report.result, printer);
        }
    }

    let errors: usize = reports.iter().map(|r| r.errors).sum();
    if errors > 0 {
        let failed = reports.iter().filter(|r| r.errors > 0).count();
        return Err(PaletteaError::Validation {
            message: format!(
                "{} in {}",
                plural(errors, "error", "errors"),
                plural(failed, "script", "scripts")
            ),
            help: None,
        });
    }

    if !args.json {
        printer.success(
            "Validated",
            &plural(reports.len(), "script", "scripts"),
        );
    }
    Ok(())
}

/// Parse and validate one file. Parse failures become an error diagnostic.
pub fn check_file(path: &Path, config: &Config) -> FileReport {
    let (name, result) = match load_script(path, config.effective_tip_size()) {
        Ok(script) => {
            let result = validate_script_with_history(&script, config.effective_history_limit());
            (script.name, result)
        }
        Err(e) => {
            let mut result = ValidationResult::new();
            result.push(Diagnostic::error("palettea::validate::parse", e.to_string()));
            (script_stem(path), result)
        }
    };

    FileReport {
        file: display_path(path),
        name,
        errors: result.error_count(),
        warnings: result.warning_count(),
        result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_check_file_clean() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ok.paint.yaml");
        fs::write(&path, "canvas: { width: 4, height: 4 }").unwrap();

        let report = check_file(&path, &Config::default());
        assert_eq!(report.name, "ok");
        assert_eq!((report.errors, report.warnings), (0, 0));
    }

    #[test]
    fn test_check_file_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.paint.yaml");
        fs::write(&path, "canvas: nope").unwrap();

        let report = check_file(&path, &Config::default());
        assert_eq!(report.name, "broken");
        assert_eq!(report.errors, 1);
        assert_eq!(report.result.codes(), vec!["palettea::validate::parse"]);
    }

    #[test]
    fn test_check_file_uses_history_limit() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deep.paint.yaml");
        fs::write(
            &path,
            "canvas: { width: 4, height: 4 }\nbrushes:\n  ink: {}\nactions:\n  - stroke: { brush: ink, points: [[1, 1]] }\n  - stroke: { brush: ink, points: [[2, 2]] }\n  - undo\n  - undo",
        )
        .unwrap();

        assert_eq!(check_file(&path, &Config::default()).warnings, 0);

        let config = Config {
            history_limit: Some(1),
            ..Default::default()
        };
        let report = check_file(&path, &config);
        assert_eq!(report.result.codes(), vec!["palettea::validate::nothing-to-undo"]);
    }

    #[test]
    fn test_run_fails_on_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.paint.yaml");
        fs::write(&path, "canvas: { width: 4, height: 4 }\nactions: [{ delete: Layer 1 }]").unwrap();

        let args = ValidateArgs {
            paths: vec![path],
            json: false,
        };
        let err = run(args, &Printer::new()).unwrap_err();
        assert!(err.to_string().contains("1 error in 1 script"));
    }

    #[test]
    fn test_run_passes_with_warnings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("warn.paint.yaml");
        fs::write(&path, "canvas: { width: 4, height: 4 }\nactions: [undo]").unwrap();

        let args = ValidateArgs {
            paths: vec![path],
            json: true,
        };
        assert!(run(args, &Printer::new()).is_ok());
    }

    #[test]
    fn test_report_serializes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("warn.paint.yaml");
        fs::write(&path, "canvas: { width: 4, height: 4 }\nactions: [redo]").unwrap();

        let json = serde_json::to_value(check_file(&path, &Config::default())).unwrap();
        assert_eq!(json["name"], "warn");
        assert_eq!(json["warnings"], 1);
        assert_eq!(json["diagnostics"][0]["code"], "palettea::validate::nothing-to-redo");
        assert_eq!(json["diagnostics"][0]["action"], 1);
    }
}
