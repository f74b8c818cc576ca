//! Brush rendering engine.
//!
//! Samples flow through the engine in one direction:
//!
//! ```text
//! InputSample[] --(interpolate)--> StrokeRenderer --(symmetry)--> Surface
//! ```
//!
//! `Surface` is the drawing boundary; `RasterSurface` is the software
//! implementation used by the canvas and the CLI.

pub mod blend;
pub mod interpolate;
mod raster;
mod renderer;
mod surface;
pub mod symmetry;
pub mod tip;

pub use raster::{DrawState, RasterSurface};
pub use renderer::{StrokeRenderer, StrokeStats};
pub use surface::{StateGuard, Surface};
