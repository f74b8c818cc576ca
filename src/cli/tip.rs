//! Tip command implementation.
//!
//! Rasterizes a procedural brush tip to PNG, optionally as a sample stroke.

use std::path::PathBuf;

use clap::Args;

use crate::canvas::{write_png, Canvas, CanvasOptions};
use crate::engine::tip::{self, DEFAULT_TIP_SIZE};
use crate::error::Result;
use crate::output::{display_path, Printer};
use crate::types::{BrushDescriptor, Colour, InputSample, TipShape};

/// Render a brush tip preview
#[derive(Args, Debug)]
pub struct TipArgs {
    /// Tip shape (round, soft, square)
    pub shape: TipShape,

    /// Edge length of the tip in pixels
    #[arg(long, default_value_t = DEFAULT_TIP_SIZE)]
    pub size: u32,

    /// Tip colour (#RRGGBB, #RGBA, hsv(h, s, v), ...)
    #[arg(long, default_value = "#000000")]
    pub colour: Colour,

    /// Output PNG path
    #[arg(long, short)]
    pub output: PathBuf,

    /// Scale factor for output (integer upscaling)
    #[arg(long, default_value = "1")]
    pub scale: u32,

    /// Paint a pressure-ramped sample stroke instead of a single tip
    #[arg(long)]
    pub stroke: bool,
}

pub fn run(args: TipArgs, printer: &Printer) -> Result<()> {
    let size = args.size.max(1);
    let tip = tip::rasterize(args.shape, args.colour, size);

    if args.stroke {
        let canvas = sample_stroke(BrushDescriptor::new(args.shape.name(), tip), size)?;
        canvas.export_png(&args.output, args.scale)?;
    } else {
        write_png(tip.image(), &args.output, args.scale)?;
    }

    printer.success(
        "Wrote",
        &format!("{} {}", display_path(&args.output), printer.dim(&format!("({} tip)", args.shape))),
    );
    Ok(())
}

/// A left-to-right stroke with pressure rising from 0.2 to 1, on a
/// transparent canvas four tips wide.
fn sample_stroke(brush: BrushDescriptor, size: u32) -> Result<Canvas> {
    let width = size * 4;
    let mut canvas = Canvas::with_options(
        width,
        size,
        CanvasOptions {
            background: Colour::TRANSPARENT,
            ..Default::default()
        },
    );

    let half = size as f64 / 2.0;
    let brush = brush.with_size(size as f32 * 0.8).with_pressure(true, false);
    let samples = [
        InputSample::new(half, half, 0.2),
        InputSample::new(width as f64 - half, half, 1.0),
    ];
    canvas.paint(&samples, &brush)?;
    Ok(canvas)
}
