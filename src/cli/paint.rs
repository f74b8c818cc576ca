//! Paint command implementation.
//!
//! Plays paint scripts and writes the flattened canvases as PNG images.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::canvas::write_png;
use crate::config::Config;
use crate::discovery::{discover, discover_paths};
use crate::error::{PaletteaError, Result};
use crate::output::{display_path, plural, Printer};
use crate::parser::load_script;
use crate::player::play;
use crate::validation::{print_diagnostics, validate_script_with_history};

/// Play paint scripts and write PNG images
#[derive(Args, Debug, Default)]
pub struct PaintArgs {
    /// Scripts or directories (default: sources from palettea.yaml, or the
    /// current directory)
    pub paths: Vec<PathBuf>,

    /// Output directory (default: `output` from palettea.yaml, or dist)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Scale factor for output (integer upscaling)
    #[arg(long)]
    pub scale: Option<u32>,

    /// Render samples as given, without spacing-based interpolation
    #[arg(long)]
    pub no_interpolate: bool,

    /// Also write one PNG per layer
    #[arg(long)]
    pub layers: bool,
}

/// Settings resolved from flags over config.
#[derive(Debug, Clone)]
struct PaintSettings {
    output: PathBuf,
    scale: u32,
    layers: bool,
    config: Config,
}

pub fn run(args: PaintArgs, printer: &Printer) -> Result<()> {
    let discovery = if args.paths.is_empty() {
        discover(".")?
    } else {
        discover_paths(&args.paths)?
    };

    let mut config = discovery.config;
    if args.no_interpolate {
        config.interpolate = Some(false);
    }
    let settings = PaintSettings {
        output: args.output.unwrap_or_else(|| config.output.clone()),
        scale: args.scale.unwrap_or_else(|| config.effective_scale()).max(1),
        layers: args.layers,
        config,
    };

    let scripts = discovery.scan.scripts;
    if scripts.is_empty() {
        printer.warning("Skipped", "no paint scripts found");
        return Ok(());
    }

    fs::create_dir_all(&settings.output).map_err(|e| PaletteaError::Io {
        path: settings.output.clone(),
        message: format!("Failed to create output directory: {}", e),
    })?;

    let mut written = 0;
    let mut failed = 0;
    for path in &scripts {
        match paint_file(path, &settings, printer) {
            Ok(count) => written += count,
            Err(e) => {
                printer.error("Failed", &format!("{}: {}", display_path(path), e));
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(PaletteaError::Build {
            message: format!(
                "{} of {} failed",
                plural(failed, "script", "scripts"),
                scripts.len()
            ),
            help: Some("Run `palettea validate` for details".to_string()),
        });
    }

    printer.success(
        "Finished",
        &format!(
            "{} to {}",
            plural(written, "image", "images"),
            display_path(&settings.output)
        ),
    );
    Ok(())
}

/// Paint one script. Returns the number of PNGs written.
fn paint_file(path: &Path, settings: &PaintSettings, printer: &Printer) -> Result<usize> {
    let script = load_script(path, settings.config.effective_tip_size())?;

    let diagnostics =
        validate_script_with_history(&script, settings.config.effective_history_limit());
    if diagnostics.has_errors() || diagnostics.has_warnings() {
        print_diagnostics(&script.name, &diagnostics, printer);
    }
    if diagnostics.has_errors() {
        return Err(PaletteaError::Validation {
            message: format!(
                "'{}' has {}",
                script.name,
                plural(diagnostics.error_count(), "error", "errors")
            ),
            help: None,
        });
    }

    printer.status(
        "Painting",
        &format!(
            "{} {}",
            script.name,
            printer.dim(&format!(
                "({}x{}, {})",
                script.canvas.width,
                script.canvas.height,
                plural(script.stroke_count(), "stroke", "strokes")
            ))
        ),
    );

    let played = play(&script, settings.config.canvas_options())?;
    log::info!(
        "'{}': {} dab(s) from {} sample(s)",
        script.name,
        played.summary.dabs,
        played.summary.samples
    );

    let out = settings.output.join(format!("{}.png", script.name));
    played.canvas.export_png(&out, settings.scale)?;
    printer.success("Wrote", &printer.cyan(&display_path(&out)));
    let mut written = 1;

    if settings.layers {
        for layer in played.canvas.layers().iter() {
            let out = settings
                .output
                .join(format!("{}.{}.png", script.name, slug(&layer.name)));
            write_png(layer.surface.image(), &out, settings.scale)?;
            printer.info("Wrote", &printer.cyan(&display_path(&out)));
            written += 1;
        }
    }

    Ok(written)
}

/// File-name-safe form of a layer name: `Ink Lines` -> `ink-lines`.
fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        "layer".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SCRIPT: &str = r##"
canvas: { width: 8, height: 6, background: "#fff" }
brushes:
  ink: { size: 2, tip: square, colour: "#f00" }
layers: [Back, Ink Lines]
actions:
  - stroke: { brush: ink, points: [[2, 2], [6, 2]] }
"##;

    fn args(dir: &Path, paths: Vec<PathBuf>) -> PaintArgs {
        PaintArgs {
            paths,
            output: Some(dir.join("out")),
            ..Default::default()
        }
    }

    #[test]
    fn test_paint_writes_png() {
        let dir = tempdir().unwrap();
        let script = dir.path().join("line.paint.yaml");
        fs::write(&script, SCRIPT).unwrap();

        run(args(dir.path(), vec![script]), &Printer::new()).unwrap();

        let img = image::open(dir.path().join("out/line.png")).unwrap().to_rgba8();
        assert_eq!((img.width(), img.height()), (8, 6));
        assert_eq!(img.get_pixel(4, 2).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(4, 5).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_paint_layers_and_scale() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("line.paint.yaml"), SCRIPT).unwrap();

        let mut a = args(dir.path(), vec![dir.path().to_path_buf()]);
        a.layers = true;
        a.scale = Some(2);
        run(a, &Printer::new()).unwrap();

        let out = dir.path().join("out");
        let flat = image::open(out.join("line.png")).unwrap();
        assert_eq!((flat.width(), flat.height()), (16, 12));
        assert!(out.join("line.back.png").exists());
        let ink = image::open(out.join("line.ink-lines.png")).unwrap().to_rgba8();
        assert_eq!(ink.get_pixel(0, 0).0[3], 0);
        assert_eq!(ink.get_pixel(8, 4).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_invalid_script_fails_without_output() {
        let dir = tempdir().unwrap();
        let script = dir.path().join("bad.paint.yaml");
        fs::write(
            &script,
            "canvas: { width: 4, height: 4 }\nactions:\n  - stroke: { brush: ghost, points: [[1, 1]] }",
        )
        .unwrap();

        let err = run(args(dir.path(), vec![script]), &Printer::new()).unwrap_err();
        assert!(matches!(err, PaletteaError::Build { .. }));
        assert!(!dir.path().join("out/bad.png").exists());
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("Ink Lines"), "ink-lines");
        assert_eq!(slug("  --Sketch #2 "), "sketch-2");
        assert_eq!(slug("***"), "layer");
    }
}
