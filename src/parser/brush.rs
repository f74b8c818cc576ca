//! Brush definition parser.
//!
//! Converts the `brushes:` entries of a paint script into
//! `BrushDescriptor` instances, rasterizing or loading their tips.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::engine::tip;
use crate::error::{PaletteaError, Result};
use crate::types::{BlendMode, BrushDescriptor, Colour, Dynamics, Grain, SymmetryFlags, TipImage, TipShape};

/// Where a brush tip comes from.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawTip {
    /// A procedural shape name (`round`, `soft`, `square`).
    Shape(String),
    /// An image file, relative to the script.
    File { path: PathBuf },
}

impl Default for RawTip {
    fn default() -> Self {
        RawTip::Shape(TipShape::Round.name().to_string())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawGrain {
    pub texture: Option<PathBuf>,
    pub scale: Option<f32>,
    pub rotation: Option<f32>,
}

/// A brush as written in a script, before tips are resolved.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawBrush {
    #[serde(default = "default_size")]
    pub size: f32,
    #[serde(default = "default_unit")]
    pub opacity: f32,
    #[serde(default = "default_unit")]
    pub flow: f32,
    /// Radians.
    #[serde(default)]
    pub rotation: f32,
    #[serde(default)]
    pub blend: BlendMode,
    #[serde(default = "default_spacing")]
    pub spacing: f32,
    #[serde(default)]
    pub streamline: f32,
    #[serde(default)]
    pub scatter: f32,
    #[serde(default)]
    pub pressure_size: bool,
    #[serde(default)]
    pub pressure_opacity: bool,
    #[serde(default)]
    pub tilt_size: bool,
    #[serde(default)]
    pub tilt_opacity: bool,
    #[serde(default)]
    pub symmetry: Option<SymmetryFlags>,
    #[serde(default)]
    pub dynamics: Option<Dynamics>,
    #[serde(default)]
    pub grain: Option<RawGrain>,
    #[serde(default)]
    pub tip: RawTip,
    #[serde(default = "default_colour")]
    pub colour: Colour,
}

fn default_size() -> f32 {
    12.0
}

fn default_unit() -> f32 {
    1.0
}

fn default_spacing() -> f32 {
    0.1
}

fn default_colour() -> Colour {
    Colour::BLACK
}

/// Settings shared by every brush in a script.
#[derive(Debug, Clone)]
pub struct BrushContext {
    /// Directory tip and grain paths are resolved against.
    pub base_dir: PathBuf,
    /// Edge length of procedurally rasterized tips.
    pub tip_size: u32,
}

impl Default for BrushContext {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            tip_size: tip::DEFAULT_TIP_SIZE,
        }
    }
}

/// Build a brush descriptor from its raw definition.
pub fn build_brush(name: &str, raw: RawBrush, ctx: &BrushContext) -> Result<BrushDescriptor> {
    let tip = resolve_tip(name, &raw.tip, raw.colour, ctx)?;

    let grain = match raw.grain {
        Some(g) => Some(Grain {
            texture: g
                .texture
                .map(|p| TipImage::load(&resolve_path(&ctx.base_dir, &p)))
                .transpose()?,
            scale: g.scale,
            rotation: g.rotation,
        }),
        None => None,
    };

    Ok(BrushDescriptor {
        name: name.to_string(),
        tip,
        size: raw.size,
        opacity: raw.opacity,
        flow: raw.flow,
        rotation: raw.rotation,
        blend_mode: raw.blend,
        spacing: raw.spacing,
        streamline: raw.streamline,
        scatter: raw.scatter,
        pressure_size: raw.pressure_size,
        pressure_opacity: raw.pressure_opacity,
        tilt_size: raw.tilt_size,
        tilt_opacity: raw.tilt_opacity,
        symmetry: raw.symmetry,
        dynamics: raw.dynamics,
        grain,
    })
}

fn resolve_tip(name: &str, raw: &RawTip, colour: Colour, ctx: &BrushContext) -> Result<TipImage> {
    match raw {
        RawTip::Shape(shape) => {
            let shape: TipShape = shape.parse().map_err(|_| PaletteaError::Parse {
                message: format!("Brush '{}' has unknown tip shape '{}'", name, shape),
                help: Some("Use round, soft, square, or { path: file.png }".to_string()),
            })?;
            Ok(tip::rasterize(shape, colour, ctx.tip_size))
        }
        RawTip::File { path } => TipImage::load(&resolve_path(&ctx.base_dir, path)),
    }
}

fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
