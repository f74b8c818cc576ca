//! Software raster surface backed by an `RgbaImage`.
//!
//! Implements the `Surface` boundary with a canvas-style state stack
//! (global alpha, blend mode, affine transform) and a transformed,
//! nearest-texel image blit.

use image::{Rgba, RgbaImage};
use kurbo::{Affine, Point, Rect};

use crate::error::{PaletteaError, Result};
use crate::types::{BlendMode, Colour, TipImage};

use super::blend::composite;
use super::surface::Surface;

/// Save/restore-able drawing state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawState {
    pub alpha: f32,
    pub blend: BlendMode,
    pub transform: Affine,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            blend: BlendMode::SourceOver,
            transform: Affine::IDENTITY,
        }
    }
}

/// An RGBA pixel buffer with a drawing state stack.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    pixels: RgbaImage,
    state: DrawState,
    stack: Vec<DrawState>,
}

impl RasterSurface {
    /// Create a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_image(RgbaImage::new(width, height))
    }

    /// Create a surface filled with a colour.
    pub fn filled(width: u32, height: u32, colour: Colour) -> Self {
        Self::from_image(RgbaImage::from_pixel(width, height, Rgba(colour.to_rgba())))
    }

    pub fn from_image(pixels: RgbaImage) -> Self {
        Self {
            pixels,
            state: DrawState::default(),
            stack: Vec::new(),
        }
    }

    /// Current drawing state.
    pub fn state(&self) -> &DrawState {
        &self.state
    }

    /// Depth of the save stack.
    pub fn saved_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    /// Replace the pixel buffer, keeping the drawing state.
    pub fn replace_pixels(&mut self, pixels: RgbaImage) {
        self.pixels = pixels;
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Colour> {
        if x < self.pixels.width() && y < self.pixels.height() {
            Some(Colour::from(self.pixels.get_pixel(x, y).0))
        } else {
            None
        }
    }

    /// Fill every pixel with a colour (ignores drawing state).
    pub fn fill(&mut self, colour: Colour) {
        for px in self.pixels.pixels_mut() {
            *px = Rgba(colour.to_rgba());
        }
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.fill(Colour::TRANSPARENT);
    }

    /// Composite another image on top at the origin, honouring the current
    /// blend mode and global alpha (transform is ignored).
    pub fn composite_image(&mut self, top: &RgbaImage) {
        let w = self.pixels.width().min(top.width());
        let h = self.pixels.height().min(top.height());
        for y in 0..h {
            for x in 0..w {
                let src = top.get_pixel(x, y).0;
                let coverage = src[3] as f32 / 255.0 * self.state.alpha;
                let dst = self.pixels.get_pixel(x, y).0;
                self.pixels
                    .put_pixel(x, y, Rgba(composite(self.state.blend, src, coverage, dst)));
            }
        }
    }

    /// Number of non-transparent pixels.
    pub fn painted_pixels(&self) -> usize {
        self.pixels.pixels().filter(|p| p.0[3] > 0).count()
    }
}

impl Surface for RasterSurface {
    fn width(&self) -> u32 {
        self.pixels.width()
    }

    fn height(&self) -> u32 {
        self.pixels.height()
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        if alpha.is_finite() {
            self.state.alpha = alpha.clamp(0.0, 1.0);
        }
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.state.blend = mode;
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.state.transform = self.state.transform * Affine::translate((x, y));
    }

    fn rotate(&mut self, radians: f64) {
        self.state.transform = self.state.transform * Affine::rotate(radians);
    }

    fn draw_image(&mut self, image: &TipImage, dest: Rect) -> Result<()> {
        if image.is_empty() {
            return Err(PaletteaError::Render {
                message: format!(
                    "cannot draw an empty tip image ({}x{})",
                    image.width(),
                    image.height()
                ),
                help: Some("Rasterize or load the tip before painting".to_string()),
            });
        }
        if ![dest.x0, dest.y0, dest.x1, dest.y1].iter().all(|v| v.is_finite()) {
            return Err(PaletteaError::Render {
                message: format!("non-finite destination rectangle {:?}", dest),
                help: None,
            });
        }

        let dest = dest.abs();
        if dest.width() <= 0.0 || dest.height() <= 0.0 {
            return Ok(());
        }

        let transform = self.state.transform;
        let det = transform.determinant();
        if det == 0.0 || !det.is_finite() {
            return Ok(());
        }
        let inverse = transform.inverse();

        let bounds = transform.transform_rect_bbox(dest);
        let x_start = bounds.x0.floor().max(0.0) as u32;
        let y_start = bounds.y0.floor().max(0.0) as u32;
        let x_end = (bounds.x1.ceil().max(0.0) as u32).min(self.pixels.width());
        let y_end = (bounds.y1.ceil().max(0.0) as u32).min(self.pixels.height());

        let tex_w = image.width() as f64;
        let tex_h = image.height() as f64;
        let alpha = self.state.alpha;
        let blend = self.state.blend;

        for py in y_start..y_end {
            for px in x_start..x_end {
                let local = inverse * Point::new(px as f64 + 0.5, py as f64 + 0.5);
                if !dest.contains(local) {
                    continue;
                }
                let u = ((local.x - dest.x0) / dest.width() * tex_w) as u32;
                let v = ((local.y - dest.y0) / dest.height() * tex_h) as u32;
                let texel = image.texel(u, v);
                if texel[3] == 0 && !clears_outside_source(blend) {
                    continue;
                }
                let coverage = texel[3] as f32 / 255.0 * alpha;
                let dst = self.pixels.get_pixel(px, py).0;
                self.pixels.put_pixel(px, py, Rgba(composite(blend, texel, coverage, dst)));
            }
        }

        Ok(())
    }
}

/// Operators that change the backdrop even where the source is transparent.
fn clears_outside_source(mode: BlendMode) -> bool {
    matches!(
        mode,
        BlendMode::Copy
            | BlendMode::SourceIn
            | BlendMode::SourceOut
            | BlendMode::DestinationIn
            | BlendMode::DestinationAtop
    )
}
