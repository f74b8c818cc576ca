//! Brush descriptor.
//!
//! A `BrushDescriptor` describes everything the renderer needs to paint a
//! stroke: base size and opacity, the pressure/tilt dynamics switches, the
//! compositing operator, symmetry flags and the shared tip image. The
//! descriptor is read, never mutated, while a stroke is being painted.
//!
//! Optional groups (`symmetry`, `dynamics`, `grain`) are explicit `Option`s
//! so that "not configured" is a distinct, checked state.

use crate::types::{BlendMode, InputSample, TipImage};

/// Which mirror axes are enabled. Missing flags are treated as `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(default)]
pub struct SymmetryFlags {
    /// Mirror across the vertical centre line: (w - x, y).
    pub horizontal: bool,
    /// Mirror across the horizontal centre line: (x, h - y).
    pub vertical: bool,
    /// Mirror through the centre point: (w - x, h - y).
    pub both: bool,
}

impl SymmetryFlags {
    pub const NONE: Self = Self {
        horizontal: false,
        vertical: false,
        both: false,
    };

    pub fn horizontal() -> Self {
        Self {
            horizontal: true,
            ..Self::NONE
        }
    }

    pub fn vertical() -> Self {
        Self {
            vertical: true,
            ..Self::NONE
        }
    }

    pub fn all() -> Self {
        Self {
            horizontal: true,
            vertical: true,
            both: true,
        }
    }

    /// Number of extra positions each sample produces.
    pub fn mirror_count(&self) -> usize {
        [self.horizontal, self.vertical, self.both]
            .iter()
            .filter(|&&f| f)
            .count()
    }
}

/// Speed and rotation jitter settings.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Deserialize)]
pub struct Dynamics {
    pub speed: Option<f32>,
    pub rotation: Option<f32>,
}

/// Paper grain texture settings.
#[derive(Debug, Clone, Default)]
pub struct Grain {
    pub texture: Option<TipImage>,
    pub scale: Option<f32>,
    pub rotation: Option<f32>,
}

/// Immutable-per-stroke brush configuration.
#[derive(Debug, Clone)]
pub struct BrushDescriptor {
    /// Brush name, used in diagnostics.
    pub name: String,
    /// Shared tip raster stamped at every dab.
    pub tip: TipImage,
    /// Base dab size in pixels (width and height).
    pub size: f32,
    /// Base opacity in [0, 1].
    pub opacity: f32,
    /// Paint flow in [0, 1].
    pub flow: f32,
    /// Tip rotation in radians.
    pub rotation: f32,
    pub blend_mode: BlendMode,
    /// Dab spacing as a fraction of the size; used when densifying strokes.
    pub spacing: f32,
    pub streamline: f32,
    pub scatter: f32,
    pub pressure_size: bool,
    pub pressure_opacity: bool,
    pub tilt_size: bool,
    pub tilt_opacity: bool,
    pub symmetry: Option<SymmetryFlags>,
    pub dynamics: Option<Dynamics>,
    pub grain: Option<Grain>,
}

impl BrushDescriptor {
    /// Create a brush around a tip with default settings.
    pub fn new(name: impl Into<String>, tip: TipImage) -> Self {
        Self {
            name: name.into(),
            tip,
            size: 12.0,
            opacity: 1.0,
            flow: 1.0,
            rotation: 0.0,
            blend_mode: BlendMode::SourceOver,
            spacing: 0.1,
            streamline: 0.0,
            scatter: 0.0,
            pressure_size: false,
            pressure_opacity: false,
            tilt_size: false,
            tilt_opacity: false,
            symmetry: None,
            dynamics: None,
            grain: None,
        }
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_rotation(mut self, radians: f32) -> Self {
        self.rotation = radians;
        self
    }

    pub fn with_blend_mode(mut self, mode: BlendMode) -> Self {
        self.blend_mode = mode;
        self
    }

    pub fn with_symmetry(mut self, flags: SymmetryFlags) -> Self {
        self.symmetry = Some(flags);
        self
    }

    pub fn with_pressure(mut self, size: bool, opacity: bool) -> Self {
        self.pressure_size = size;
        self.pressure_opacity = opacity;
        self
    }

    /// Symmetry flags with absence resolved to "no mirroring".
    pub fn symmetry_flags(&self) -> SymmetryFlags {
        self.symmetry.unwrap_or_default()
    }

    /// Dab size for a sample: base size, scaled by pressure when enabled.
    pub fn effective_size(&self, sample: &InputSample) -> f32 {
        self.size * if self.pressure_size { sample.pressure } else { 1.0 }
    }

    /// Dab opacity for a sample: base opacity, scaled by pressure when enabled.
    pub fn effective_opacity(&self, sample: &InputSample) -> f32 {
        self.opacity * if self.pressure_opacity { sample.pressure } else { 1.0 }
    }

    /// Settings present in the descriptor that the renderer does not apply.
    ///
    /// Tilt has no agreed modulation formula, so it is reported instead of
    /// guessed. Flow, streamline, scatter, speed/rotation dynamics and grain
    /// are carried from the brush format but leave the stroke unchanged;
    /// they are reported only when set away from their neutral values.
    pub fn unapplied_dynamics(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.tilt_size {
            names.push("tilt_size");
        }
        if self.tilt_opacity {
            names.push("tilt_opacity");
        }
        if self.flow != 1.0 {
            names.push("flow");
        }
        if self.streamline != 0.0 {
            names.push("streamline");
        }
        if self.scatter != 0.0 {
            names.push("scatter");
        }
        if self
            .dynamics
            .is_some_and(|d| d.speed.is_some() || d.rotation.is_some())
        {
            names.push("dynamics");
        }
        if self.grain.is_some() {
            names.push("grain");
        }
        names
    }
}
