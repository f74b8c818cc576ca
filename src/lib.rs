//! palettea - Brush stroke renderer
//!
//! A library for rendering pressure-sensitive, symmetry-mirrored brush
//! strokes onto layered raster canvases, driven by YAML paint scripts.

pub mod canvas;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod output;
pub mod parser;
pub mod player;
pub mod types;
pub mod validation;

pub use canvas::{write_png, Canvas, CanvasOptions, History, Layer, LayerId, LayerStack};
pub use config::{Config, CONFIG_FILENAME};
pub use discovery::{discover, discover_paths, DiscoveryResult, ScanResult};
pub use engine::{RasterSurface, StateGuard, StrokeRenderer, StrokeStats, Surface};
pub use error::{PaletteaError, Result};
pub use parser::{load_script, parse_script, BrushContext};
pub use player::{play, PlaySummary, Played};
pub use types::{
    Action, BlendMode, BrushDescriptor, CanvasSpec, Colour, Dynamics, Grain, InputSample,
    LayerSpec, PaintScript, SymmetryFlags, Tilt, TipImage, TipShape,
};
pub use validation::{
    validate_script, validate_script_with_history, Diagnostic, Severity, ValidationResult,
};
