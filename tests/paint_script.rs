//! End-to-end tests: scripts on disk through validation, playback and PNG.

use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tempfile::tempdir;

use palettea::cli::paint::{self, PaintArgs};
use palettea::cli::validate::check_file;
use palettea::engine::tip::DEFAULT_TIP_SIZE;
use palettea::output::Printer;
use palettea::{load_script, play, validate_script, CanvasOptions, Config, PaletteaError};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn mirror_script_validates_cleanly() {
    let script = load_script(&fixture("mirror.paint.yaml"), DEFAULT_TIP_SIZE).unwrap();
    assert_eq!(script.name, "mirror");
    assert_eq!(script.stroke_count(), 3);
    assert!(!validate_script(&script).has_errors());
}

#[test]
fn mirror_script_plays_with_four_way_symmetry() {
    let script = load_script(&fixture("mirror.paint.yaml"), DEFAULT_TIP_SIZE).unwrap();
    let played = play(&script, CanvasOptions::default()).unwrap();

    assert_eq!(played.canvas.layers().names(), vec!["Wash", "Ink"]);
    assert_eq!(played.summary.strokes, 3);
    assert_eq!(played.summary.undos, 1);

    let img = played.canvas.flatten();
    // Original (8..16, 8) and its three mirrors on a 64x48 canvas.
    for (x, y) in [(12, 8), (52, 8), (12, 40), (52, 40)] {
        assert_eq!(img.get_pixel(x, y).0, [0, 0, 0, 255], "missing dab at ({}, {})", x, y);
    }
    // The undone stroke at (32, 40) leaves the background.
    assert_eq!(img.get_pixel(32, 40).0, [255, 255, 255, 255]);
    // The multiply wash tints the background: blue stays, red drops.
    let wash = img.get_pixel(40, 24).0;
    assert_eq!(wash[2], 255, "wash pixel {:?}", wash);
    assert!(wash[0] < wash[2], "wash pixel {:?}", wash);
    assert_eq!(wash[3], 255);
}

#[test]
fn paint_command_writes_png_per_script() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("dist");
    let args = PaintArgs {
        paths: vec![fixture("mirror.paint.yaml")],
        output: Some(out.clone()),
        scale: Some(2),
        layers: true,
        ..Default::default()
    };
    paint::run(args, &Printer::new()).unwrap();

    let img = image::open(out.join("mirror.png")).unwrap().to_rgba8();
    assert_eq!((img.width(), img.height()), (128, 96));
    assert_eq!(img.get_pixel(24, 16).0, [0, 0, 0, 255]);
    assert!(out.join("mirror.wash.png").exists());
    assert!(out.join("mirror.ink.png").exists());
}

#[test]
fn broken_script_reports_every_problem() {
    let report = check_file(&fixture("broken.paint.yaml"), &Config::default());
    assert_eq!(
        report.result.codes(),
        vec![
            "palettea::validate::locked-layer",
            "palettea::validate::missing-brush",
            "palettea::validate::locked-layer",
            "palettea::validate::last-layer",
        ]
    );

    insta::assert_json_snapshot!(report.result.iter().map(|d| d.action).collect::<Vec<_>>(), @r"
    [
      1,
      2,
      2,
      3
    ]
    ");
}

#[test]
fn broken_script_refuses_to_paint() {
    let dir = tempdir().unwrap();
    let args = PaintArgs {
        paths: vec![fixture("broken.paint.yaml")],
        output: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    let err = paint::run(args, &Printer::new()).unwrap_err();
    assert!(matches!(err, PaletteaError::Build { .. }));
    assert!(!dir.path().join("broken.png").exists());
}

#[test]
fn playback_stops_at_first_failing_action() {
    let script = load_script(&fixture("broken.paint.yaml"), 8).unwrap();
    let err = play(&script, CanvasOptions::default()).unwrap_err();
    assert!(err.to_string().contains("#1 (stroke)"), "{}", err);
}

#[test]
fn unreadable_script_is_an_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.paint.yaml");
    assert!(matches!(
        load_script(&path, 8),
        Err(PaletteaError::Io { .. })
    ));
    fs::write(&path, "canvas: {}").unwrap();
    assert!(matches!(load_script(&path, 8), Err(PaletteaError::Parse { .. })));
}
