//! Tip rasterization.
//!
//! Tips are drawn once into a fixed-size offscreen image and then shared by
//! every dab. The colour is baked in here; the renderer only scales, rotates
//! and fades the result.

use image::{Rgba, RgbaImage};

use crate::types::{unit_to_byte, Colour, TipImage, TipShape};

/// Default edge length of a rasterized tip, in pixels.
pub const DEFAULT_TIP_SIZE: u32 = 64;

/// Rasterize a procedural tip shape.
pub fn rasterize(shape: TipShape, colour: Colour, size: u32) -> TipImage {
    let size = size.max(1);
    let radius = size as f32 / 2.0;
    let base_alpha = colour.a as f32 / 255.0;

    let img = RgbaImage::from_fn(size, size, |x, y| {
        let dx = x as f32 + 0.5 - radius;
        let dy = y as f32 + 0.5 - radius;
        let distance = (dx * dx + dy * dy).sqrt();

        let coverage = match shape {
            TipShape::Square => 1.0,
            // One pixel of anti-aliasing across the rim.
            TipShape::Round => (radius - distance + 0.5).clamp(0.0, 1.0),
            TipShape::Soft => (1.0 - distance / radius).max(0.0),
        };

        Rgba([colour.r, colour.g, colour.b, unit_to_byte(coverage * base_alpha)])
    });

    TipImage::new(img)
}
