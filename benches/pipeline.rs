//! Benchmarks for the palettea pipeline.

use std::fs;
use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kurbo::{Point, Rect};

use palettea::engine::{blend, interpolate, symmetry, tip};
use palettea::parser::{parse_script, BrushContext};
use palettea::{
    play, BlendMode, BrushDescriptor, CanvasOptions, Colour, InputSample, RasterSurface,
    StrokeRenderer, SymmetryFlags, TipShape,
};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn load_fixture(name: &str) -> String {
    fs::read_to_string(fixtures_dir().join(name)).unwrap()
}

/// A diagonal stroke with rising pressure.
fn diagonal(len: usize) -> Vec<InputSample> {
    (0..len)
        .map(|i| {
            let t = i as f64 / len as f64;
            InputSample::new(20.0 + t * 200.0, 20.0 + t * 200.0, 0.2 + 0.8 * t as f32)
        })
        .collect()
}

// -- Parsing benchmarks --

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    let source = load_fixture("mirror.paint.yaml");
    let ctx = BrushContext {
        tip_size: 32,
        ..Default::default()
    };

    group.bench_function("parse_script", |b| {
        b.iter(|| parse_script(black_box(&source), &ctx).unwrap())
    });

    group.finish();
}

// -- Engine benchmarks --

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");

    group.bench_function("symmetry_expand_all", |b| {
        b.iter(|| {
            symmetry::expand(
                black_box(Point::new(20.0, 30.0)),
                SymmetryFlags::all(),
                100.0,
                100.0,
            )
        })
    });

    group.bench_function("composite_multiply", |b| {
        b.iter(|| {
            blend::composite(
                BlendMode::Multiply,
                black_box([200, 100, 50, 255]),
                0.5,
                black_box([10, 220, 130, 200]),
            )
        })
    });

    group.bench_function("rasterize_soft_64", |b| {
        b.iter(|| tip::rasterize(TipShape::Soft, Colour::BLACK, black_box(64)))
    });

    let sparse = diagonal(16);
    let bounds = Rect::new(0.0, 0.0, 256.0, 256.0);
    group.bench_function("densify_16_samples", |b| {
        b.iter(|| interpolate::densify(black_box(&sparse), 1.0, bounds))
    });

    group.finish();
}

// -- Rendering benchmarks --

fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");

    let round = tip::rasterize(TipShape::Round, Colour::rgb(30, 30, 30), 64);
    let samples = diagonal(100);

    let plain = BrushDescriptor::new("plain", round.clone())
        .with_size(16.0)
        .with_pressure(true, true);
    group.bench_function("stroke_100_samples", |b| {
        b.iter(|| {
            let mut surface = RasterSurface::new(256, 256);
            StrokeRenderer::new(&mut surface)
                .draw_stroke(black_box(&samples), &plain)
                .unwrap()
        })
    });

    let mirrored = plain
        .clone()
        .with_symmetry(SymmetryFlags::all())
        .with_blend_mode(BlendMode::Multiply)
        .with_rotation(0.6);
    group.bench_function("stroke_100_samples_mirrored_rotated", |b| {
        b.iter(|| {
            let mut surface = RasterSurface::filled(256, 256, Colour::WHITE);
            StrokeRenderer::new(&mut surface)
                .draw_stroke(black_box(&samples), &mirrored)
                .unwrap()
        })
    });

    let source = load_fixture("mirror.paint.yaml");
    let script = parse_script(&source, &BrushContext::default()).unwrap();
    group.bench_function("play_and_flatten_fixture", |b| {
        b.iter(|| {
            let played = play(black_box(&script), CanvasOptions::default()).unwrap();
            played.canvas.flatten()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_engine, bench_rendering);
criterion_main!(benches);
