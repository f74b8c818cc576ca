//! Parsers for palettea paint scripts.
//!
//! A paint script is a YAML document with a canvas, named brushes, initial
//! layers and an ordered list of actions:
//!
//! ```yaml
//! canvas: { width: 128, height: 128, background: "#fff" }
//! brushes:
//!   ink: { size: 8, tip: soft, colour: "#222", symmetry: { horizontal: true } }
//! layers: [Sketch, Ink]
//! actions:
//!   - stroke: { brush: ink, layer: Ink, points: [[10, 10], [40, 40, 0.5]] }
//!   - undo
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use palettea::parser::load_script;
//!
//! let script = load_script(Path::new("sketch.paint.yaml"), 64)?;
//! println!("{} strokes", script.stroke_count());
//! ```

pub mod brush;
pub mod script;

pub use brush::{build_brush, BrushContext, RawBrush, RawTip};
pub use script::{load_script, parse_script, script_stem, SCRIPT_SUFFIX};
