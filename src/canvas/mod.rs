//! Layered canvas document.
//!
//! A `Canvas` owns the layer stack and the undo history and routes strokes
//! to the active layer's raster surface.

mod history;
mod layers;

use std::path::Path;

use image::RgbaImage;

use crate::engine::{interpolate, RasterSurface, StrokeRenderer, StrokeStats};
use crate::error::{PaletteaError, Result};
use crate::types::{BrushDescriptor, Colour, InputSample};

pub use history::{History, Snapshot, DEFAULT_HISTORY_LIMIT};
pub use layers::{Layer, LayerId, LayerStack};

/// Canvas-wide options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasOptions {
    /// Colour under all layers when flattening.
    pub background: Colour,
    /// Undo steps kept.
    pub history_limit: usize,
    /// Densify strokes by the brush spacing before rendering.
    pub interpolate: bool,
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            background: Colour::WHITE,
            history_limit: DEFAULT_HISTORY_LIMIT,
            interpolate: true,
        }
    }
}

/// A painting document: layers, history and options.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    layers: LayerStack,
    history: History,
    options: CanvasOptions,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_options(width, height, CanvasOptions::default())
    }

    pub fn with_options(width: u32, height: u32, options: CanvasOptions) -> Self {
        Self {
            width,
            height,
            layers: LayerStack::new(width, height),
            history: History::new(options.history_limit),
            options,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn options(&self) -> &CanvasOptions {
        &self.options
    }

    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    /// Layer operations. Structural changes are not recorded in history.
    pub fn layers_mut(&mut self) -> &mut LayerStack {
        &mut self.layers
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Discard all layers and history, leaving a single empty layer.
    pub fn reset(&mut self) {
        self.layers = LayerStack::new(self.width, self.height);
        self.history.clear();
    }

    /// Paint a stroke onto the active layer.
    ///
    /// The pre-stroke pixels are recorded for undo. Fails without touching
    /// history when the active layer is locked. A render failure leaves the
    /// partially painted layer in place; undo brings back the prior pixels.
    pub fn paint(&mut self, samples: &[InputSample], brush: &BrushDescriptor) -> Result<StrokeStats> {
        let layer = self.layers.active().ok_or_else(|| PaletteaError::Layer {
            message: "no active layer".to_string(),
            help: None,
        })?;
        if layer.locked {
            return Err(PaletteaError::Layer {
                message: format!("layer '{}' is locked", layer.name),
                help: Some("Unlock the layer before painting on it".to_string()),
            });
        }

        let dense;
        let samples = if self.options.interpolate {
            let bounds = interpolate::paint_bounds(brush, samples, self.width, self.height);
            dense = interpolate::densify(samples, interpolate::step_for(brush), bounds);
            dense.as_slice()
        } else {
            samples
        };

        self.history.record(&self.layers);
        let layer = self.layers.active_mut().ok_or_else(|| PaletteaError::Layer {
            message: "no active layer".to_string(),
            help: None,
        })?;
        let stats = StrokeRenderer::new(&mut layer.surface).draw_stroke(samples, brush)?;
        log::debug!(
            "painted {} dab(s) from {} sample(s) on '{}'",
            stats.dabs,
            stats.samples,
            layer.name
        );
        Ok(stats)
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.layers)
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.layers)
    }

    /// Composite visible layers bottom-to-top over the background.
    pub fn flatten(&self) -> RgbaImage {
        let mut out = RasterSurface::filled(self.width, self.height, self.options.background);
        for layer in self.layers.iter().filter(|l| l.visible) {
            out.composite_image(layer.surface.image());
        }
        out.into_image()
    }

    /// Flatten and write a PNG, upscaling by an integer factor.
    pub fn export_png(&self, path: &Path, scale: u32) -> Result<()> {
        write_png(&self.flatten(), path, scale)
    }
}

/// Write an image to PNG with nearest-neighbour integer upscaling.
pub fn write_png(img: &RgbaImage, path: &Path, scale: u32) -> Result<()> {
    let scale = scale.max(1);
    let scaled;
    let img = if scale > 1 {
        scaled = image::imageops::resize(
            img,
            img.width() * scale,
            img.height() * scale,
            image::imageops::FilterType::Nearest,
        );
        &scaled
    } else {
        img
    };

    img.save(path).map_err(|e| PaletteaError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })
}
