//! List command implementation.
//!
//! Prints the supported blend modes and tip shapes, then an inventory of
//! discovered paint scripts.

use std::path::PathBuf;

use clap::Args;

use crate::discovery::{discover, discover_paths};
use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::parser::load_script;
use crate::types::{BlendMode, TipShape};

/// List blend modes, tip shapes and discovered scripts
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Files or directories to scan (default: current directory)
    pub paths: Vec<PathBuf>,

    /// Only list blend modes and tip shapes
    #[arg(long)]
    pub builtins: bool,
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    for (label, names) in builtin_groups() {
        printer.info(label, &names);
    }

    if args.builtins {
        return Ok(());
    }

    let discovery = if args.paths.is_empty() {
        discover(".")?
    } else {
        discover_paths(&args.paths)?
    };
    let tip_size = discovery.config.effective_tip_size();

    for path in &discovery.scan.scripts {
        match load_script(path, tip_size) {
            Ok(script) => printer.info(
                "Script",
                &format!(
                    "{} {}",
                    printer.bold(&script.name),
                    printer.dim(&format!(
                        "{}x{}, {}, {}",
                        script.canvas.width,
                        script.canvas.height,
                        plural(script.brushes.len(), "brush", "brushes"),
                        plural(script.stroke_count(), "stroke", "strokes")
                    ))
                ),
            ),
            Err(e) => printer.warning("Unreadable", &format!("{}: {}", display_path(path), e)),
        }
    }

    Ok(())
}

/// Labelled, comma-separated lists of the built-in names.
pub fn builtin_groups() -> Vec<(&'static str, String)> {
    let blends: Vec<&str> = BlendMode::ALL.iter().map(|m| m.name()).collect();
    let tips: Vec<&str> = TipShape::ALL.iter().map(|t| t.name()).collect();
    vec![("Blends", blends.join(", ")), ("Tips", tips.join(", "))]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_builtin_groups() {
        let text: Vec<String> = builtin_groups()
            .into_iter()
            .map(|(label, names)| format!("{}: {}", label, names))
            .collect();
        insta::assert_snapshot!(text.join("\n"), @"
        Blends: source-over, source-in, source-out, source-atop, destination-over, destination-in, destination-out, destination-atop, lighter, copy, xor, multiply, screen, overlay, darken, lighten, color-dodge, color-burn, hard-light, soft-light, difference, exclusion
        Tips: round, soft, square
        ");
    }

    #[test]
    fn test_list_with_scripts() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.paint.yaml"), "canvas: { width: 2, height: 2 }").unwrap();
        fs::write(dir.path().join("b.paint.yaml"), "not: valid").unwrap();

        let args = ListArgs {
            paths: vec![dir.path().to_path_buf()],
            builtins: false,
        };
        assert!(run(args, &Printer::new()).is_ok());
    }
}
