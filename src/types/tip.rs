//! Brush tip images.
//!
//! A tip is a small pre-rasterized RGBA image stamped once per dab. Tips are
//! shared read-only between every brush and stroke that uses them, so the
//! pixel data lives behind an `Arc`.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::error::{PaletteaError, Result};

/// Shared, immutable tip raster.
#[derive(Clone)]
pub struct TipImage {
    pixels: Arc<RgbaImage>,
}

impl TipImage {
    /// Wrap an already rasterized image.
    pub fn new(image: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(image),
        }
    }

    /// Load a tip from an image file on disk.
    pub fn load(path: &Path) -> Result<Self> {
        let img = image::open(path)
            .map_err(|e| PaletteaError::Io {
                path: path.to_path_buf(),
                message: format!("Failed to load tip image: {}", e),
            })?
            .to_rgba8();
        Ok(Self::new(img))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// A tip with no pixels cannot be drawn.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Borrow the underlying raster.
    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    /// RGBA of the texel at (x, y), clamped to the image edge.
    pub fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        let x = x.min(self.width().saturating_sub(1));
        let y = y.min(self.height().saturating_sub(1));
        self.pixels.get_pixel(x, y).0
    }
}

impl fmt::Debug for TipImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TipImage({}x{})", self.width(), self.height())
    }
}

/// Procedural tip shapes that can be rasterized on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipShape {
    /// Hard-edged disc with a one pixel anti-aliased rim.
    #[default]
    Round,
    /// Disc whose alpha falls off linearly towards the rim.
    Soft,
    /// Fully covered square.
    Square,
}

impl TipShape {
    pub const ALL: [TipShape; 3] = [TipShape::Round, TipShape::Soft, TipShape::Square];

    pub fn name(self) -> &'static str {
        match self {
            TipShape::Round => "round",
            TipShape::Soft => "soft",
            TipShape::Square => "square",
        }
    }
}

impl FromStr for TipShape {
    type Err = PaletteaError;

    fn from_str(s: &str) -> Result<Self> {
        TipShape::ALL
            .iter()
            .copied()
            .find(|shape| shape.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PaletteaError::Parse {
                message: format!("Unknown tip shape: {}", s),
                help: Some("Use round, soft, square, or { path: file.png }".to_string()),
            })
    }
}

impl fmt::Display for TipShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
