//! Core domain types for palettea.
//!
//! - `BrushDescriptor` - per-stroke brush configuration
//! - `InputSample` - a pointer observation (position, pressure, tilt)
//! - `TipImage` / `TipShape` - shared tip rasters and procedural shapes
//! - `BlendMode` - compositing operators
//! - `Colour` - RGBA colour values
//! - `PaintScript` - canvas, brushes, layers and actions to replay

mod blend_mode;
mod brush;
mod colour;
mod sample;
mod script;
mod tip;

pub(crate) use colour::unit_to_byte;

pub use blend_mode::BlendMode;
pub use brush::{BrushDescriptor, Dynamics, Grain, SymmetryFlags};
pub use colour::Colour;
pub use sample::{InputSample, Tilt};
pub use script::{Action, CanvasSpec, LayerSpec, PaintScript};
pub use tip::{TipImage, TipShape};
